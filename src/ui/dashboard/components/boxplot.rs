//! Expression boxplot panel
//!
//! Box traces are drawn on a canvas: quartile box, median, 1.5 IQR whiskers,
//! a dotted mean line and every observation jittered around the box center.

use super::super::state::{DashboardState, Panel};
use super::super::utils::marker_color;
use crate::outcome::Outcome;
use crate::plot::stats::BoxStats;
use crate::plot::{BoxTrace, Figure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

const BOX_HALF_WIDTH: f64 = 0.3;

/// Drawable geometry for one box trace.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGlyph {
    pub label: String,
    pub color: Color,
    pub center: f64,
    pub stats: Option<BoxStats>,
    pub points: Vec<(f64, f64)>,
}

/// Observations spread horizontally by the trace's jitter.
///
/// Seeded per trace so the points stay put between frames.
fn jittered_points(trace: &BoxTrace, center: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = trace.jitter * BOX_HALF_WIDTH;
    let anchor = center + trace.pointpos * BOX_HALF_WIDTH;
    trace
        .y
        .iter()
        .copied()
        .filter(|y| y.is_finite())
        .map(|y| {
            let offset = if spread > 0.0 {
                rng.gen_range(-spread..=spread)
            } else {
                0.0
            };
            (anchor + offset, y)
        })
        .collect()
}

pub fn box_glyphs(figure: &Figure) -> Vec<BoxGlyph> {
    figure
        .box_traces()
        .enumerate()
        .map(|(index, trace)| {
            let center = (index + 1) as f64;
            BoxGlyph {
                label: trace.name.clone(),
                color: marker_color(&trace.marker.color),
                center,
                stats: BoxStats::from_values(&trace.y),
                points: jittered_points(trace, center, index as u64),
            }
        })
        .collect()
}

fn value_bounds(glyphs: &[BoxGlyph]) -> [f64; 2] {
    let (lo, hi) = glyphs
        .iter()
        .filter_map(|glyph| glyph.stats)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), stats| {
            (lo.min(stats.min), hi.max(stats.max))
        });
    if lo > hi {
        return [0.0, 1.0];
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    // leave room below the boxes for the group labels
    [lo - span * 0.15, hi + span * 0.05]
}

fn draw_segment(ctx: &mut Context, (x1, y1): (f64, f64), (x2, y2): (f64, f64), color: Color) {
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

fn draw_box(ctx: &mut Context, glyph: &BoxGlyph, stats: &BoxStats, show_mean: bool) {
    let left = glyph.center - BOX_HALF_WIDTH;
    let right = glyph.center + BOX_HALF_WIDTH;
    let cap = BOX_HALF_WIDTH / 2.0;
    let color = glyph.color;

    // quartile box
    draw_segment(ctx, (left, stats.q1), (right, stats.q1), color);
    draw_segment(ctx, (left, stats.q3), (right, stats.q3), color);
    draw_segment(ctx, (left, stats.q1), (left, stats.q3), color);
    draw_segment(ctx, (right, stats.q1), (right, stats.q3), color);
    draw_segment(ctx, (left, stats.median), (right, stats.median), Color::White);

    // whiskers
    draw_segment(ctx, (glyph.center, stats.lower_whisker), (glyph.center, stats.q1), color);
    draw_segment(ctx, (glyph.center, stats.q3), (glyph.center, stats.upper_whisker), color);
    draw_segment(
        ctx,
        (glyph.center - cap, stats.lower_whisker),
        (glyph.center + cap, stats.lower_whisker),
        color,
    );
    draw_segment(
        ctx,
        (glyph.center - cap, stats.upper_whisker),
        (glyph.center + cap, stats.upper_whisker),
        color,
    );

    if show_mean {
        let dots: Vec<(f64, f64)> = (0..=6)
            .map(|step| (left + step as f64 * BOX_HALF_WIDTH / 3.0, stats.mean))
            .collect();
        ctx.draw(&Points {
            coords: &dots,
            color: Color::LightYellow,
        });
    }
}

fn render_figure(f: &mut Frame, area: ratatui::layout::Rect, figure: &Figure, block: Block) {
    let glyphs = box_glyphs(figure);
    let show_mean = figure.box_traces().any(|trace| trace.boxmean);
    let y_bounds = value_bounds(&glyphs);
    let label_y = y_bounds[0] + (y_bounds[1] - y_bounds[0]) * 0.02;

    let canvas = Canvas::default()
        .block(block.title(figure.layout.title.to_uppercase()))
        .x_bounds([0.0, glyphs.len() as f64 + 1.0])
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for glyph in &glyphs {
                if let Some(stats) = &glyph.stats {
                    draw_box(ctx, glyph, stats, show_mean);
                }
                if !glyph.points.is_empty() {
                    ctx.draw(&Points {
                        coords: &glyph.points,
                        color: glyph.color,
                    });
                }
                let summary = match &glyph.stats {
                    Some(stats) => format!("{} (n={})", glyph.label, stats.count),
                    None => format!("{} (n=0)", glyph.label),
                };
                ctx.print(glyph.center - BOX_HALF_WIDTH, label_y, summary);
            }
        });
    f.render_widget(canvas, area);
}

pub fn render_boxplot_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let message = match &state.boxplot {
        Panel::Blank => Line::styled(
            "Select a protein on the volcano plot",
            Style::default().fg(Color::DarkGray),
        ),
        Panel::Settled { gene, outcome } => match outcome {
            Outcome::Data(figure) => {
                render_figure(f, area, figure, block);
                return;
            }
            Outcome::Error(message) => {
                Line::styled(format!("{}: {}", gene, message), Style::default().fg(Color::Red))
            }
            Outcome::Empty => Line::from(format!("{}: no expression values", gene)),
        },
    };

    f.render_widget(
        Paragraph::new(message)
            .block(block.title("EXPRESSION"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoxplotDataset, GroupSamples};
    use crate::plot::boxplot_figure;

    fn figure() -> Figure {
        boxplot_figure(&BoxplotDataset {
            gene_symbol: "APOE".to_string(),
            young: GroupSamples::from_values(vec![1.0, 2.0, 3.0, 4.0]),
            old: GroupSamples::from_values(vec![5.0, 6.0]),
        })
    }

    #[test]
    fn one_glyph_per_group_in_trace_order() {
        let glyphs = box_glyphs(&figure());
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].label, "Young");
        assert_eq!(glyphs[0].center, 1.0);
        assert_eq!(glyphs[0].color, Color::Rgb(8, 81, 156));
        assert_eq!(glyphs[1].label, "Old");
        assert_eq!(glyphs[1].stats.map(|s| s.count), Some(2));
    }

    #[test]
    fn jitter_stays_inside_the_box_and_is_stable() {
        let first = box_glyphs(&figure());
        let second = box_glyphs(&figure());
        assert_eq!(first, second);

        for glyph in &first {
            for (x, _) in &glyph.points {
                assert!((x - glyph.center).abs() <= BOX_HALF_WIDTH);
            }
        }
        let ys: Vec<f64> = first[0].points.iter().map(|(_, y)| *y).collect();
        assert_eq!(ys, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn bounds_fall_back_without_values() {
        assert_eq!(value_bounds(&[]), [0.0, 1.0]);
    }
}
