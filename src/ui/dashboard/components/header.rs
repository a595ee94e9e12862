//! Dashboard header component
//!
//! Renders the title and request activity gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and pipeline activity.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = format!(
        "PROTEO DASH v{}  |  {}",
        env!("CARGO_PKG_VERSION"),
        state.environment.api_url()
    );

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let in_flight = state.in_flight();
    let (progress_text, gauge_color, progress_percent) = if in_flight > 0 {
        // Animated gauge - loops every 20 ticks
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        let plural = if in_flight == 1 { "" } else { "s" };
        (
            format!("LOADING - {} request{} in flight", in_flight, plural),
            Color::LightYellow,
            progress,
        )
    } else {
        let uptime = state.start_time.elapsed().as_secs();
        (
            format!("READY - up {}m {:02}s", uptime / 60, uptime % 60),
            Color::LightBlue,
            100,
        )
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
