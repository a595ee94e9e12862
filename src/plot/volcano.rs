//! Volcano plot figure
//!
//! Two scatter series split by the upstream `significant` flag, plus dashed
//! guide lines at the fixed significance thresholds.

use super::{Axis, Figure, Layout, Legend, Marker, PlotConfig, ScatterTrace, Shape, ShapeLine, Trace};
use crate::consts::dash_consts::thresholds;
use crate::models::{VolcanoDataset, VolcanoPoint};

const HOVER_TEMPLATE: &str = "<b>%{text}</b><br>log<sub>2</sub>FC: %{x:.3f}<br>-log<sub>10</sub>(adj.P.Val): %{y:.3f}<extra></extra>";

/// Split points into (not significant, significant), keeping input order in each.
pub fn partition(points: &[VolcanoPoint]) -> (Vec<&VolcanoPoint>, Vec<&VolcanoPoint>) {
    let (significant, not_significant): (Vec<_>, Vec<_>) =
        points.iter().partition(|point| point.significant);
    (not_significant, significant)
}

fn scatter(name: &str, points: &[&VolcanoPoint], marker: Marker) -> ScatterTrace {
    ScatterTrace {
        name: name.to_string(),
        mode: "markers".to_string(),
        x: points.iter().map(|p| p.log_fc).collect(),
        y: points.iter().map(|p| p.neg_log10_pval).collect(),
        text: points.iter().map(|p| p.gene_symbol.clone()).collect(),
        marker,
        hoverinfo: Some("text+x+y".to_string()),
        hovertemplate: Some(HOVER_TEMPLATE.to_string()),
    }
}

/// Observed (min x, max x, max y) over finite coordinates only.
fn extent(points: &[VolcanoPoint]) -> Option<(f64, f64, f64)> {
    let xs = points.iter().map(|p| p.log_fc).filter(|x| x.is_finite());
    let (x_min, x_max) = xs.fold(None, |acc: Option<(f64, f64)>, x| match acc {
        None => Some((x, x)),
        Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
    })?;
    let y_max = points
        .iter()
        .map(|p| p.neg_log10_pval)
        .filter(|y| y.is_finite())
        .reduce(f64::max)?;
    Some((x_min, x_max, y_max))
}

/// Guide lines for p < 0.05 and |log2FC| > 1. Empty when there is nothing to span.
pub fn threshold_shapes(points: &[VolcanoPoint]) -> Vec<Shape> {
    let Some((x_min, x_max, y_max)) = extent(points) else {
        return Vec::new();
    };
    let guide = || ShapeLine {
        color: "rgba(0, 0, 0, 0.5)".to_string(),
        width: 1,
        dash: "dash".to_string(),
    };
    let p_cutoff = thresholds::neg_log10_p_cutoff();
    let fc = thresholds::LOG_FC_CUTOFF;

    vec![
        Shape::line(x_min, p_cutoff, x_max, p_cutoff, guide()),
        Shape::line(fc, 0.0, fc, y_max, guide()),
        Shape::line(-fc, 0.0, -fc, y_max, guide()),
    ]
}

pub fn volcano_figure(dataset: &VolcanoDataset) -> Figure {
    let (not_significant, significant) = partition(&dataset.points);

    let traces = vec![
        Trace::Scatter(scatter(
            "Not Significant",
            &not_significant,
            Marker {
                color: "gray".to_string(),
                size: 8,
                opacity: Some(0.7),
            },
        )),
        Trace::Scatter(scatter(
            "Significant",
            &significant,
            Marker {
                color: "red".to_string(),
                size: 10,
                opacity: Some(0.8),
            },
        )),
    ];

    let axis = |title: &str| Axis {
        title: title.to_string(),
        zeroline: true,
        zerolinecolor: Some("#666".to_string()),
        gridcolor: Some("#ddd".to_string()),
    };

    let layout = Layout {
        title: "Protein Activity: Volcano Plot".to_string(),
        xaxis: Some(axis("log<sub>2</sub> Fold Change")),
        yaxis: Some(axis("-log<sub>10</sub> Adjusted P-Value")),
        hovermode: Some("closest".to_string()),
        legend: Some(Legend { x: 0.95, y: 0.95 }),
        boxmode: None,
        shapes: threshold_shapes(&dataset.points),
    };

    Figure {
        traces,
        layout,
        config: PlotConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(gene: &str, log_fc: f64, y: f64, significant: bool) -> VolcanoPoint {
        VolcanoPoint {
            gene_symbol: gene.to_string(),
            log_fc,
            neg_log10_pval: y,
            significant,
        }
    }

    fn mixed_dataset() -> VolcanoDataset {
        let points = (0..10)
            .map(|i| {
                point(
                    &format!("G{}", i),
                    i as f64 - 5.0,
                    i as f64 * 0.5,
                    i % 3 == 0,
                )
            })
            .collect();
        VolcanoDataset::new(points)
    }

    #[test]
    fn partition_is_disjoint_complete_and_stable() {
        let dataset = mixed_dataset();
        let (rest, significant) = partition(&dataset.points);

        assert_eq!(rest.len() + significant.len(), dataset.len());
        assert!(significant.iter().all(|p| p.significant));
        assert!(rest.iter().all(|p| !p.significant));

        let order: Vec<&str> = significant.iter().map(|p| p.gene_symbol.as_str()).collect();
        assert_eq!(order, vec!["G0", "G3", "G6", "G9"]);
    }

    #[test]
    fn figure_has_two_aligned_series_with_flag_cardinalities() {
        let mut points = Vec::new();
        for i in 0..3 {
            points.push(point(&format!("S{}", i), 2.0 + i as f64, 4.0, true));
        }
        for i in 0..7 {
            points.push(point(&format!("N{}", i), 0.1 * i as f64, 0.5, false));
        }
        let figure = volcano_figure(&VolcanoDataset::new(points));

        let series: Vec<&ScatterTrace> = figure.scatter_traces().collect();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Not Significant");
        assert_eq!(series[0].x.len(), 7);
        assert_eq!(series[1].x.len(), 3);
        for trace in series {
            assert_eq!(trace.x.len(), trace.y.len());
            assert_eq!(trace.x.len(), trace.text.len());
        }
    }

    #[test]
    fn p_value_guide_is_fixed_regardless_of_data() {
        let all_significant = VolcanoDataset::new(vec![
            point("A", -3.0, 8.0, true),
            point("B", 4.0, 6.0, true),
        ]);
        let shapes = threshold_shapes(&all_significant.points);
        assert_eq!(shapes.len(), 3);

        let horizontal = &shapes[0];
        assert!((horizontal.y0 - 1.301_029_995_663_981).abs() < 1e-12);
        assert_eq!(horizontal.y0, horizontal.y1);
        assert_eq!((horizontal.x0, horizontal.x1), (-3.0, 4.0));

        assert_eq!((shapes[1].x0, shapes[1].y0, shapes[1].y1), (1.0, 0.0, 8.0));
        assert_eq!((shapes[2].x0, shapes[2].y0, shapes[2].y1), (-1.0, 0.0, 8.0));
    }

    #[test]
    fn empty_dataset_renders_without_shapes() {
        let figure = volcano_figure(&VolcanoDataset::default());
        assert!(figure.layout.shapes.is_empty());
        assert_eq!(figure.scatter_traces().count(), 2);
        assert!(figure.scatter_traces().all(|t| t.x.is_empty()));
    }

    #[test]
    fn non_finite_coordinates_do_not_leak_into_shapes() {
        let dataset = VolcanoDataset::new(vec![
            point("A", f64::NAN, f64::INFINITY, false),
            point("B", 1.5, 2.0, false),
        ]);
        let shapes = threshold_shapes(&dataset.points);
        assert_eq!((shapes[0].x0, shapes[0].x1), (1.5, 1.5));
        assert_eq!(shapes[1].y1, 2.0);

        let only_nan = vec![point("A", f64::NAN, f64::NAN, false)];
        assert!(threshold_shapes(&only_nan).is_empty());
    }

    #[test]
    fn click_carries_label_and_coordinates() {
        let figure = volcano_figure(&mixed_dataset());
        let click = figure.find_point("G3").unwrap();
        assert_eq!(click.curve_number, 1);
        assert_eq!(click.point_number, 1);
        assert_eq!((click.x, click.y), (-2.0, 1.5));
        assert!(figure.find_point("missing").is_none());
        assert!(figure.click_at(0, 99).is_none());
    }

    #[test]
    fn serializes_with_plotly_field_names() {
        let figure = volcano_figure(&mixed_dataset());
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][1]["marker"]["color"], "red");
        assert_eq!(json["layout"]["shapes"][0]["type"], "line");
        assert_eq!(json["config"]["responsive"], true);
    }
}
