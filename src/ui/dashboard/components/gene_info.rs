//! Gene info panel
//!
//! Publications are listed as title plus raw URL; nothing is opened from
//! inside the dashboard.

use super::super::state::{DashboardState, Panel};
use crate::consts::dash_consts::messages::{NO_PUBLICATIONS, PUBLICATIONS_HEADING};
use crate::models::Publication;
use crate::outcome::Outcome;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Lines for a settled gene info panel.
pub fn gene_info_lines<'a>(gene: &'a str, outcome: &'a Outcome<Vec<Publication>>) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        gene,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))];

    match outcome {
        Outcome::Error(message) => {
            lines.push(Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            )));
        }
        Outcome::Empty => lines.push(Line::from(NO_PUBLICATIONS)),
        Outcome::Data(publications) => {
            lines.push(Line::from(Span::styled(
                PUBLICATIONS_HEADING,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (index, publication) in publications.iter().enumerate() {
                lines.push(Line::from(format!("{}. {}", index + 1, publication.title)));
                lines.push(Line::from(Span::styled(
                    format!("   {}", publication.url),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                )));
            }
        }
    }
    lines
}

pub fn render_gene_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines = match &state.gene_info {
        Panel::Blank => vec![Line::from(Span::styled(
            "No protein selected",
            Style::default().fg(Color::DarkGray),
        ))],
        Panel::Settled { gene, outcome } => gene_info_lines(gene, outcome),
    };

    let block = Block::default()
        .title("GENE INFO")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
