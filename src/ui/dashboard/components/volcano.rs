//! Volcano plot panel
//!
//! Draws the scatter traces and threshold shapes of the volcano figure as a
//! ratatui chart, with the keyboard cursor highlighted.

use super::super::state::{DashboardState, VolcanoPanel};
use super::super::utils::{marker_color, plain_text};
use crate::plot::Figure;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph,
};

/// Axis bounds covering every finite point and shape, padded by 5%.
pub fn chart_bounds(figure: &Figure) -> ([f64; 2], [f64; 2]) {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    for trace in figure.scatter_traces() {
        xs.extend(&trace.x);
        ys.extend(&trace.y);
    }
    for shape in &figure.layout.shapes {
        xs.extend([shape.x0, shape.x1]);
        ys.extend([shape.y0, shape.y1]);
    }
    (padded(&xs, [-1.0, 1.0]), padded(&ys, [0.0, 1.0]))
}

fn padded(values: &[f64], fallback: [f64; 2]) -> [f64; 2] {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        return fallback;
    }
    let span = if hi > lo { hi - lo } else { 1.0 };
    [lo - span * 0.05, hi + span * 0.05]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{:.1}", v)))
        .collect()
}

pub fn render_volcano_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let figure = match &state.volcano {
        VolcanoPanel::Rendered(figure) => figure,
        VolcanoPanel::Uninitialized | VolcanoPanel::Loading => {
            let waiting = Paragraph::new("Loading volcano plot data...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title("VOLCANO PLOT"));
            f.render_widget(waiting, area);
            return;
        }
        // The plot area stays empty; the failure is only in the activity log.
        VolcanoPanel::Unrendered => {
            f.render_widget(block.title("VOLCANO PLOT"), area);
            return;
        }
    };

    let series: Vec<(String, Vec<(f64, f64)>, Color)> = figure
        .scatter_traces()
        .map(|trace| {
            let points = trace
                .x
                .iter()
                .zip(&trace.y)
                .map(|(x, y)| (*x, *y))
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            (trace.name.clone(), points, marker_color(&trace.marker.color))
        })
        .collect();

    let shapes: Vec<[(f64, f64); 2]> = figure
        .layout
        .shapes
        .iter()
        .map(|shape| [(shape.x0, shape.y0), (shape.x1, shape.y1)])
        .collect();

    let cursor_click = figure.click_at(state.cursor.curve, state.cursor.point);
    let cursor_point: Vec<(f64, f64)> = cursor_click
        .iter()
        .map(|click| (click.x, click.y))
        .collect();

    let mut datasets: Vec<Dataset> = shapes
        .iter()
        .map(|segment| {
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(segment)
        })
        .collect();
    for (name, points, color) in &series {
        datasets.push(
            Dataset::default()
                .name(name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(points),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .data(&cursor_point),
    );

    let title = match &cursor_click {
        Some(click) if !click.text.is_empty() => format!(
            "{} | cursor: {} ({:.2}, {:.2})",
            figure.layout.title.to_uppercase(),
            click.text,
            click.x,
            click.y
        ),
        _ => figure.layout.title.to_uppercase(),
    };

    let axis_title = |axis: &Option<crate::plot::Axis>| {
        axis.as_ref()
            .map(|axis| plain_text(&axis.title))
            .unwrap_or_default()
    };
    let (x_bounds, y_bounds) = chart_bounds(figure);

    let chart = Chart::new(datasets)
        .block(block.title(title))
        .x_axis(
            Axis::default()
                .title(axis_title(&figure.layout.xaxis))
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(axis_title(&figure.layout.yaxis))
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        )
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VolcanoDataset, VolcanoPoint};
    use crate::plot::volcano_figure;

    #[test]
    fn empty_figure_uses_fallback_bounds() {
        let figure = volcano_figure(&VolcanoDataset::new(Vec::new()));
        assert_eq!(chart_bounds(&figure), ([-1.0, 1.0], [0.0, 1.0]));
    }

    #[test]
    fn bounds_cover_points_and_threshold_lines() {
        let figure = volcano_figure(&VolcanoDataset::new(vec![
            VolcanoPoint {
                gene_symbol: "A".to_string(),
                log_fc: -0.5,
                neg_log10_pval: 0.2,
                significant: false,
            },
            VolcanoPoint {
                gene_symbol: "B".to_string(),
                log_fc: 0.5,
                neg_log10_pval: 0.8,
                significant: false,
            },
        ]));
        let ([x0, x1], [y0, y1]) = chart_bounds(&figure);
        // the vertical cutoffs at +-1 are wider than the data
        assert!(x0 < -1.0 && x1 > 1.0);
        // the p-value cutoff sits above every point
        assert!(y0 < 0.2 && y1 > 1.30103);
    }
}
