//! Session setup and initialization

use crate::api::{ApiClient, ExpressionApi};
use crate::config::Config;
use crate::consts::dash_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::{EventSender, PipelineFetcher};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Completion events from the fetch pipelines
    pub event_receiver: mpsc::Receiver<Event>,
    /// Runs dashboard effects against the API
    pub fetcher: PipelineFetcher,
    /// The API the session reads from
    pub environment: Environment,
}

/// Sets up a dashboard session
///
/// Builds the HTTP client (honouring timeouts from the config file, if any)
/// and the event channel the fetch pipelines report on.
///
/// # Arguments
/// * `env` - API endpoint to read from
/// * `config` - Loaded config file, if one exists
pub fn setup_session(env: Environment, config: Option<&Config>) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::from_config(env, config)?;
    let environment = client.environment().clone();
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let fetcher = PipelineFetcher::new(Arc::new(client), EventSender::new(event_sender));

    Ok(SessionData {
        event_receiver,
        fetcher,
        environment,
    })
}
