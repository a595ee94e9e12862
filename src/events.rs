//! Event System
//!
//! Everything the dashboard controller reacts to arrives as an [`Event`]:
//! point clicks from the renderer and results from the fetch pipelines.

use crate::api::error::ApiError;
use crate::logging::{LogLevel, should_log_with_env};
use crate::models::{BoxplotDataset, Publication, VolcanoDataset};
use crate::outcome::Outcome;
use crate::plot::PointClick;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Pipeline {
    /// Loads the volcano dataset once at start.
    Volcano,
    /// Point selection coming from the renderer.
    Selection,
    /// Loads the per-gene boxplot.
    Boxplot,
    /// Loads the per-gene publication list.
    GeneInfo,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// A response that arrived after a newer selection.
    Discarded,
}

/// Gene and selection generation captured when a per-gene fetch is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub gene: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Log-only event.
    Notice,
    VolcanoLoaded(VolcanoDataset),
    PointClicked(PointClick),
    BoxplotSettled {
        ticket: Ticket,
        outcome: Outcome<BoxplotDataset>,
    },
    GeneInfoSettled {
        ticket: Ticket,
        outcome: Outcome<Vec<Publication>>,
    },
    /// Transport or parse failure. Only logged, panels keep what they show.
    Failed { ticket: Option<Ticket> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub pipeline: Pipeline,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: Payload,
}

impl Event {
    fn new(
        pipeline: Pipeline,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: Payload,
    ) -> Self {
        Self {
            pipeline,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload,
        }
    }

    pub fn notice(pipeline: Pipeline, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(pipeline, msg, event_type, log_level, Payload::Notice)
    }

    pub fn volcano_loaded(dataset: VolcanoDataset) -> Self {
        Self::new(
            Pipeline::Volcano,
            if dataset.is_empty() {
                "Volcano data contains no proteins".to_string()
            } else {
                format!("Loaded {} proteins", dataset.len())
            },
            EventType::Success,
            LogLevel::Info,
            Payload::VolcanoLoaded(dataset),
        )
    }

    pub fn point_clicked(click: PointClick) -> Self {
        Self::new(
            Pipeline::Selection,
            format!("Selected {}", click.text),
            EventType::Refresh,
            LogLevel::Info,
            Payload::PointClicked(click),
        )
    }

    pub fn boxplot_settled(ticket: Ticket, outcome: Outcome<BoxplotDataset>) -> Self {
        Self::new(
            Pipeline::Boxplot,
            format!("Boxplot for {}: {}", ticket.gene, outcome.label()),
            settled_type(&outcome),
            LogLevel::Info,
            Payload::BoxplotSettled { ticket, outcome },
        )
    }

    pub fn gene_info_settled(ticket: Ticket, outcome: Outcome<Vec<Publication>>) -> Self {
        Self::new(
            Pipeline::GeneInfo,
            format!("Gene info for {}: {}", ticket.gene, outcome.label()),
            settled_type(&outcome),
            LogLevel::Info,
            Payload::GeneInfoSettled { ticket, outcome },
        )
    }

    pub fn transport_failed(pipeline: Pipeline, ticket: Option<Ticket>, error: &ApiError) -> Self {
        let msg = match &ticket {
            Some(ticket) => format!("Error loading {} data for {}: {}", pipeline, ticket.gene, error),
            None => format!("Error loading {} data: {}", pipeline, error),
        };
        Self::new(
            pipeline,
            msg,
            EventType::Error,
            error.log_level(),
            Payload::Failed { ticket },
        )
    }

    /// Copy for the activity log, without the data it carried.
    pub fn log_entry(&self) -> Self {
        Self {
            pipeline: self.pipeline,
            msg: self.msg.clone(),
            timestamp: self.timestamp.clone(),
            event_type: self.event_type,
            log_level: self.log_level,
            payload: Payload::Notice,
        }
    }

    /// Whether this event finishes a dispatched fetch.
    pub fn completes_fetch(&self) -> bool {
        matches!(
            self.payload,
            Payload::VolcanoLoaded(_)
                | Payload::BoxplotSettled { .. }
                | Payload::GeneInfoSettled { .. }
                | Payload::Failed { .. }
        )
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

// Domain errors are a normal answer for the pipeline, so they log at info.
fn settled_type<T>(outcome: &Outcome<T>) -> EventType {
    if outcome.is_error() {
        EventType::Error
    } else {
        EventType::Success
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.pipeline, self.msg
        )
    }
}
