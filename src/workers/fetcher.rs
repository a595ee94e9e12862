//! Pipeline fetching
//!
//! Each dashboard effect becomes one request. The result is reported back as
//! a single completion event; there is no retry and no cancellation.

use super::core::EventSender;
use crate::api::ExpressionApi;
use crate::events::{Event, EventType, Pipeline, Ticket};
use crate::logging::LogLevel;
use crate::outcome::Outcome;
use crate::ui::dashboard::state::Effect;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs dashboard effects on the tokio runtime
#[derive(Clone)]
pub struct PipelineFetcher {
    api: Arc<dyn ExpressionApi>,
    event_sender: EventSender,
}

impl PipelineFetcher {
    pub fn new(api: Arc<dyn ExpressionApi>, event_sender: EventSender) -> Self {
        Self { api, event_sender }
    }

    /// Spawn the request for `effect`. Its completion event goes to the event channel.
    pub fn dispatch(&self, effect: Effect) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let event_sender = self.event_sender.clone();
        tokio::spawn(async move {
            if let Effect::LoadBoxplot(ticket) | Effect::LoadGeneInfo(ticket) = &effect {
                event_sender
                    .send_pipeline_event(
                        pipeline_of(&effect),
                        format!("Requesting data for {}", ticket.gene),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
            }
            let event = run_effect(api.as_ref(), effect).await;
            event_sender.send_event(event).await;
        })
    }
}

fn pipeline_of(effect: &Effect) -> Pipeline {
    match effect {
        Effect::LoadVolcano => Pipeline::Volcano,
        Effect::LoadBoxplot(_) => Pipeline::Boxplot,
        Effect::LoadGeneInfo(_) => Pipeline::GeneInfo,
    }
}

/// Perform the request behind `effect` and turn the result into its completion event.
pub async fn run_effect(api: &dyn ExpressionApi, effect: Effect) -> Event {
    match effect {
        Effect::LoadVolcano => load_volcano(api).await,
        Effect::LoadBoxplot(ticket) => load_boxplot(api, ticket).await,
        Effect::LoadGeneInfo(ticket) => load_gene_info(api, ticket).await,
    }
}

pub async fn load_volcano(api: &dyn ExpressionApi) -> Event {
    match api.volcano_data().await {
        Ok(dataset) => Event::volcano_loaded(dataset),
        Err(e) => {
            log::log!(
                log::Level::from(e.log_level()),
                "Error loading volcano plot data: {}",
                e
            );
            Event::transport_failed(Pipeline::Volcano, None, &e)
        }
    }
}

pub async fn load_boxplot(api: &dyn ExpressionApi, ticket: Ticket) -> Event {
    match api.boxplot_data(&ticket.gene).await {
        Ok(response) => Event::boxplot_settled(ticket, Outcome::from(response)),
        Err(e) => {
            log::log!(
                log::Level::from(e.log_level()),
                "Error loading boxplot data for {}: {}",
                ticket.gene,
                e
            );
            Event::transport_failed(Pipeline::Boxplot, Some(ticket), &e)
        }
    }
}

pub async fn load_gene_info(api: &dyn ExpressionApi, ticket: Ticket) -> Event {
    match api.gene_info(&ticket.gene).await {
        Ok(response) => Event::gene_info_settled(ticket, Outcome::from(response)),
        Err(e) => {
            log::log!(
                log::Level::from(e.log_level()),
                "Error loading gene info for {}: {}",
                ticket.gene,
                e
            );
            Event::transport_failed(Pipeline::GeneInfo, Some(ticket), &e)
        }
    }
}
