//! Dashboard state management
//!
//! Contains the controller state, the panels it renders and the effects it
//! asks the fetch pipelines to run.

use crate::consts::dash_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{Event, Ticket};
use crate::models::Publication;
use crate::outcome::Outcome;
use crate::plot::Figure;
use crate::summary::SelectionSummary;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Work the controller wants done outside of itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadVolcano,
    LoadBoxplot(Ticket),
    LoadGeneInfo(Ticket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolcanoPanel {
    /// Nothing requested yet.
    Uninitialized,
    /// Request in flight.
    Loading,
    Rendered(Figure),
    /// The load failed. Nothing is drawn and no error is shown in the panel.
    Unrendered,
}

/// Content of a per-gene panel. Replaced wholesale by each accepted response.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Blank,
    Settled { gene: String, outcome: Outcome<T> },
}

impl<T> Panel<T> {
    pub fn gene(&self) -> Option<&str> {
        match self {
            Panel::Blank => None,
            Panel::Settled { gene, .. } => Some(gene),
        }
    }

    pub fn outcome(&self) -> Option<&Outcome<T>> {
        match self {
            Panel::Blank => None,
            Panel::Settled { outcome, .. } => Some(outcome),
        }
    }
}

/// The currently inspected protein.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub ticket: Ticket,
    pub summary: SelectionSummary,
}

/// Keyboard cursor over the volcano scatter points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub curve: usize,
    pub point: usize,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The API the dashboard reads from.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,

    pub volcano: VolcanoPanel,
    pub selection: Option<Selection>,
    pub boxplot: Panel<Figure>,
    pub gene_info: Panel<Vec<Publication>>,
    pub cursor: Cursor,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Animation tick counter
    pub tick: usize,

    /// Bumped on every selection; responses for older generations are dropped.
    generation: u64,
    /// Dispatched effects whose completion event has not arrived yet.
    in_flight: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: &UIConfig) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            volcano: VolcanoPanel::Uninitialized,
            selection: None,
            boxplot: Panel::Blank,
            gene_info: Panel::Blank,
            cursor: Cursor::default(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            generation: 0,
            in_flight: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True once every dispatched fetch has reported back and no events are queued.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.pending_events.is_empty()
    }

    pub(super) fn track_dispatched(&mut self, effects: &[Effect]) {
        self.in_flight += effects.len();
    }

    pub(super) fn track_completed(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn volcano_figure(&self) -> Option<&Figure> {
        match &self.volcano {
            VolcanoPanel::Rendered(figure) => Some(figure),
            _ => None,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }
}
