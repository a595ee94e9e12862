//! Headless mode execution
//!
//! Runs the same dashboard controller as the TUI, clicking the requested
//! genes one after another, then prints the settled panels.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::logging::init_console_logger;
use crate::outcome::Outcome;
use crate::plot::stats::BoxStats;
use crate::print_cmd_warn;
use crate::ui::UIConfig;
use crate::ui::dashboard::components::gene_info::gene_info_lines;
use crate::ui::dashboard::{DashboardState, VolcanoPanel};
use std::error::Error;
use std::time::Instant;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Printing the settled panels once every selection is done
///
/// # Arguments
/// * `session` - Session data from setup
/// * `selections` - Genes to click, in order
pub async fn run_headless_mode(
    mut session: SessionData,
    selections: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    print_session_starting("headless", &session.environment);

    tokio::select! {
        state = drive_selections(&mut session, selections) => {
            println!();
            for line in panel_report(&state) {
                println!("{}", line);
            }
            print_session_exit_success();
        }
        _ = tokio::signal::ctrl_c() => {
            print_session_shutdown();
        }
    }

    Ok(())
}

/// Load the volcano plot, then click each gene once the previous selection has settled.
///
/// Genes missing from the plot are skipped, as is every gene when the volcano
/// load failed. Returns the controller once nothing is left in flight.
pub async fn drive_selections(session: &mut SessionData, selections: Vec<String>) -> DashboardState {
    let mut state = DashboardState::new(
        session.environment.clone(),
        Instant::now(),
        &UIConfig::new(false),
    );
    for effect in state.initialize() {
        session.fetcher.dispatch(effect);
    }

    let mut selections = selections.into_iter();
    loop {
        for effect in state.update() {
            session.fetcher.dispatch(effect);
        }

        if state.is_idle() {
            let Some(gene) = selections.next() else {
                break;
            };
            if state.volcano_figure().is_none() {
                print_cmd_warn!("Selection skipped", "volcano plot unavailable, cannot select {}", gene);
            } else if !state.click_gene(&gene) {
                print_cmd_warn!("Selection skipped", "{} is not on the volcano plot", gene);
            }
            continue;
        }

        // The fetcher holds a sender, so the channel outlives the session.
        let Some(event) = session.event_receiver.recv().await else {
            break;
        };
        if event.should_display() {
            println!("{}", event);
        }
        state.add_event(event);
    }

    state
}

/// Text rendition of the settled dashboard panels.
pub fn panel_report(state: &DashboardState) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("== Volcano plot ==".to_string());
    match &state.volcano {
        VolcanoPanel::Rendered(figure) => {
            for trace in figure.scatter_traces() {
                lines.push(format!("{}: {} proteins", trace.name, trace.x.len()));
            }
        }
        // Matches the blank plot area of the TUI
        _ => lines.push(String::new()),
    }

    lines.push("== Selection ==".to_string());
    match &state.selection {
        Some(selection) => lines.extend(selection.summary.lines()),
        None => lines.push("No protein selected".to_string()),
    }

    lines.push("== Expression ==".to_string());
    match (state.boxplot.gene(), state.boxplot.outcome()) {
        (Some(gene), Some(outcome)) => match outcome {
            Outcome::Error(message) => lines.push(format!("{}: {}", gene, message)),
            Outcome::Empty => lines.push(format!("{}: no expression values", gene)),
            Outcome::Data(figure) => {
                lines.push(figure.layout.title.clone());
                for trace in figure.box_traces() {
                    lines.push(match BoxStats::from_values(&trace.y) {
                        Some(stats) => format!(
                            "{}: n={} median={:.3} q1={:.3} q3={:.3} mean={:.3} std={:.3}",
                            trace.name,
                            stats.count,
                            stats.median,
                            stats.q1,
                            stats.q3,
                            stats.mean,
                            stats.std
                        ),
                        None => format!("{}: n=0", trace.name),
                    });
                }
            }
        },
        _ => lines.push("No protein selected".to_string()),
    }

    lines.push("== Gene info ==".to_string());
    match (state.gene_info.gene(), state.gene_info.outcome()) {
        (Some(gene), Some(outcome)) => lines.extend(
            gene_info_lines(gene, outcome)
                .iter()
                .map(|line| line.to_string()),
        ),
        _ => lines.push("No protein selected".to_string()),
    }

    lines
}
