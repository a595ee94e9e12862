//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Pipeline;
use ratatui::prelude::Color;

/// Get a ratatui color for the pipeline that produced an event
pub fn get_pipeline_color(pipeline: &Pipeline) -> Color {
    match pipeline {
        Pipeline::Volcano => Color::Cyan,
        Pipeline::Selection => Color::Magenta,
        Pipeline::Boxplot => Color::Yellow,
        Pipeline::GeneInfo => Color::Green,
    }
}

/// Map a figure marker color onto a terminal color.
///
/// Understands the named colors the figures use plus `rgb(...)`/`rgba(...)`;
/// the alpha channel is ignored.
pub fn marker_color(color: &str) -> Color {
    let color = color.trim();
    match color {
        "gray" | "grey" => return Color::Gray,
        "red" => return Color::Red,
        "blue" => return Color::Blue,
        "green" => return Color::Green,
        _ => {}
    }

    let channels = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .map(|inner| {
            inner
                .split(',')
                .take(3)
                .filter_map(|part| part.trim().parse::<u8>().ok())
                .collect::<Vec<_>>()
        });
    match channels.as_deref() {
        Some([r, g, b]) => Color::Rgb(*r, *g, *b),
        _ => Color::White,
    }
}

/// Drop the inline markup (`<sub>`, `<b>`, ...) figure titles carry for web hosts.
pub fn plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    let month_day = parts.next().and_then(|date| date.get(5..10));
    let hour_min = parts.next().and_then(|time| time.get(0..5));
    match (month_day, hour_min) {
        (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
        // Fallback to original timestamp if parsing fails
        _ => timestamp.to_string(),
    }
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Keep the context before the reqwest dump, replace the dump itself
    let Some(index) = msg.find("Reqwest error:") else {
        return msg.to_string();
    };
    let reason = if msg.contains("ConnectTimeout") || msg.contains("connect timeout") {
        "connection timeout"
    } else if msg.contains("TimedOut") || msg.contains("timed out") {
        "request timed out"
    } else if msg.contains("Connect") || msg.contains("connection refused") {
        "server unreachable"
    } else {
        "network error"
    };
    format!("{}{}", &msg[..index], reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_figure_marker_colors() {
        assert_eq!(marker_color("gray"), Color::Gray);
        assert_eq!(marker_color("rgba(8, 81, 156, 0.6)"), Color::Rgb(8, 81, 156));
        assert_eq!(marker_color("rgb(219,64,82)"), Color::Rgb(219, 64, 82));
        assert_eq!(marker_color("#ff00ff"), Color::White);
    }

    #[test]
    fn strips_axis_title_markup() {
        assert_eq!(plain_text("log<sub>2</sub> Fold Change"), "log2 Fold Change");
        assert_eq!(plain_text("-log<sub>10</sub> Adjusted P-Value"), "-log10 Adjusted P-Value");
        assert_eq!(plain_text("Expression Level"), "Expression Level");
    }

    #[test]
    fn compacts_timestamps() {
        assert_eq!(format_compact_timestamp("2025-03-07 14:05:59"), "03-07 14:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn cleans_reqwest_dumps_but_keeps_context() {
        let msg = "Error loading Boxplot data for APOE: Reqwest error: error sending request (Connect, connection refused)";
        assert_eq!(
            clean_http_error_message(msg),
            "Error loading Boxplot data for APOE: server unreachable"
        );
        assert_eq!(clean_http_error_message("Loaded 12 proteins"), "Loaded 12 proteins");
    }
}
