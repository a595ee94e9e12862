//! Dashboard state update logic
//!
//! The reducer: each event is applied in arrival order, may replace panel
//! content, and may return effects for the fetch pipelines.

use super::state::{Cursor, DashboardState, Effect, Panel, Selection, VolcanoPanel};

use crate::events::{Event, EventType, Payload, Pipeline, Ticket};
use crate::logging::LogLevel;
use crate::plot::{PointClick, boxplot_figure, volcano_figure};
use crate::summary::SelectionSummary;

impl DashboardState {
    /// Request the volcano dataset. Only the first call has an effect.
    pub fn initialize(&mut self) -> Vec<Effect> {
        if self.volcano != VolcanoPanel::Uninitialized {
            return Vec::new();
        }
        self.volcano = VolcanoPanel::Loading;
        let effects = vec![Effect::LoadVolcano];
        self.track_dispatched(&effects);
        effects
    }

    /// Advance the animation tick and apply every queued event.
    pub fn update(&mut self) -> Vec<Effect> {
        self.tick += 1;

        let mut effects = Vec::new();
        while let Some(event) = self.pending_events.pop_front() {
            effects.extend(self.apply(event));
        }
        effects
    }

    /// Apply a single event and return the effects it triggers.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        self.add_to_activity_log(event.log_entry());
        if event.completes_fetch() {
            self.track_completed();
        }

        let effects = match event.payload {
            Payload::Notice | Payload::Failed { .. } => Vec::new(),
            Payload::VolcanoLoaded(dataset) => {
                let figure = volcano_figure(&dataset);
                self.cursor = first_point(&figure);
                self.volcano = VolcanoPanel::Rendered(figure);
                Vec::new()
            }
            Payload::PointClicked(click) => self.handle_click(&click),
            Payload::BoxplotSettled { ticket, outcome } => {
                if self.accept(Pipeline::Boxplot, &ticket) {
                    self.boxplot = Panel::Settled {
                        gene: ticket.gene,
                        outcome: outcome.map(|dataset| boxplot_figure(&dataset)),
                    };
                }
                Vec::new()
            }
            Payload::GeneInfoSettled { ticket, outcome } => {
                if self.accept(Pipeline::GeneInfo, &ticket) {
                    self.gene_info = Panel::Settled {
                        gene: ticket.gene,
                        outcome,
                    };
                }
                Vec::new()
            }
        };

        // Only a volcano failure before any render leaves the panel unrendered.
        if event.pipeline == Pipeline::Volcano
            && event.event_type == EventType::Error
            && self.volcano == VolcanoPanel::Loading
        {
            self.volcano = VolcanoPanel::Unrendered;
        }

        self.track_dispatched(&effects);
        effects
    }

    /// Select the clicked point and fan out to the per-gene pipelines.
    fn handle_click(&mut self, click: &PointClick) -> Vec<Effect> {
        if click.text.trim().is_empty() {
            self.add_to_activity_log(Event::notice(
                Pipeline::Selection,
                "Ignoring click on a point without a gene label".to_string(),
                EventType::Error,
                LogLevel::Warn,
            ));
            return Vec::new();
        }

        let ticket = Ticket {
            gene: click.text.clone(),
            generation: self.next_generation(),
        };
        self.selection = Some(Selection {
            ticket: ticket.clone(),
            summary: SelectionSummary::from_click(click),
        });

        vec![
            Effect::LoadBoxplot(ticket.clone()),
            Effect::LoadGeneInfo(ticket),
        ]
    }

    /// Whether a settled response still belongs to the latest selection.
    fn accept(&mut self, pipeline: Pipeline, ticket: &Ticket) -> bool {
        if ticket.generation == self.generation() {
            return true;
        }
        log::debug!(
            "Discarding stale {} response for {} (generation {} < {})",
            pipeline,
            ticket.gene,
            ticket.generation,
            self.generation()
        );
        self.add_to_activity_log(Event::notice(
            pipeline,
            format!("Discarded stale response for {}", ticket.gene),
            EventType::Discarded,
            LogLevel::Debug,
        ));
        false
    }
}

// Cursor handling
impl DashboardState {
    /// Move the cursor within the current series, clamped to its ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let Some(figure) = self.volcano_figure() else {
            return;
        };
        let len = figure.trace_len(self.cursor.curve);
        if len == 0 {
            return;
        }
        let point = self.cursor.point.saturating_add_signed(delta).min(len - 1);
        self.cursor.point = point;
    }

    /// Jump to the next series that has points.
    pub fn switch_series(&mut self) {
        let Some(figure) = self.volcano_figure() else {
            return;
        };
        let count = figure.traces.len();
        let next = (1..=count)
            .map(|offset| (self.cursor.curve + offset) % count)
            .find(|curve| figure.trace_len(*curve) > 0);
        if let Some(curve) = next {
            let len = figure.trace_len(curve);
            self.cursor = Cursor {
                curve,
                point: self.cursor.point.min(len - 1),
            };
        }
    }

    /// Queue a click on the point under the cursor.
    pub fn click_cursor(&mut self) -> bool {
        let click = self
            .volcano_figure()
            .and_then(|figure| figure.click_at(self.cursor.curve, self.cursor.point));
        match click {
            Some(click) => {
                self.add_event(Event::point_clicked(click));
                true
            }
            None => false,
        }
    }

    /// Queue a click on the first point labelled `gene`.
    pub fn click_gene(&mut self, gene: &str) -> bool {
        let click = self
            .volcano_figure()
            .and_then(|figure| figure.find_point(gene));
        match click {
            Some(click) => {
                self.cursor = Cursor {
                    curve: click.curve_number,
                    point: click.point_number,
                };
                self.add_event(Event::point_clicked(click));
                true
            }
            None => false,
        }
    }
}

fn first_point(figure: &crate::plot::Figure) -> Cursor {
    let curve = (0..figure.traces.len())
        .find(|curve| figure.trace_len(*curve) > 0)
        .unwrap_or(0);
    Cursor { curve, point: 0 }
}
