//! Selected protein summary

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_selection_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = match &state.selection {
        None => vec![Line::from(Span::styled(
            "Move the cursor onto a point and press Enter to inspect a protein",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(selection) => {
            let [gene, log_fc, p_value] = selection.summary.lines();
            vec![
                Line::from(Span::styled(
                    gene,
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(log_fc),
                Line::from(p_value),
            ]
        }
    };

    let block = Block::default()
        .title("SELECTION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
