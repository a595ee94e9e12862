//! Two-group expression boxplot figure

use super::{Axis, BoxTrace, Figure, Layout, Marker, PlotConfig, Trace};
use crate::models::{BoxplotDataset, GroupSamples};

pub const YOUNG: &str = "Young";
pub const OLD: &str = "Old";

fn box_trace(label: &str, samples: &GroupSamples, color: &str) -> BoxTrace {
    BoxTrace {
        name: label.to_string(),
        x: vec![label.to_string(); samples.values.len()],
        y: samples.values.clone(),
        boxpoints: "all".to_string(),
        jitter: 0.3,
        pointpos: 0.0,
        boxmean: true,
        marker: Marker {
            color: color.to_string(),
            size: 8,
            opacity: None,
        },
    }
}

pub fn boxplot_figure(dataset: &BoxplotDataset) -> Figure {
    Figure {
        traces: vec![
            Trace::Box(box_trace(YOUNG, &dataset.young, "rgba(8, 81, 156, 0.6)")),
            Trace::Box(box_trace(OLD, &dataset.old, "rgba(219, 64, 82, 0.6)")),
        ],
        layout: Layout {
            title: format!("Protein Expression: {}", dataset.gene_symbol),
            yaxis: Some(Axis {
                title: "Expression Level".to_string(),
                zeroline: false,
                ..Default::default()
            }),
            boxmode: Some("group".to_string()),
            ..Default::default()
        },
        config: PlotConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_column_per_group_with_repeated_category() {
        let dataset = BoxplotDataset {
            gene_symbol: "GDF15".to_string(),
            young: GroupSamples::from_values(vec![3.0, 1.0, 2.0]),
            old: GroupSamples::from_values(vec![5.0, 4.0]),
        };
        let figure = boxplot_figure(&dataset);
        let boxes: Vec<&BoxTrace> = figure.box_traces().collect();

        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].x, vec!["Young"; 3]);
        // values are passed through unsorted
        assert_eq!(boxes[0].y, vec![3.0, 1.0, 2.0]);
        assert_eq!(boxes[1].x, vec!["Old"; 2]);
        assert!(boxes.iter().all(|b| b.boxmean && b.boxpoints == "all"));
        assert_eq!(figure.layout.title, "Protein Expression: GDF15");
        assert!(figure.layout.shapes.is_empty());
    }

    #[test]
    fn serializes_as_box_traces() {
        let dataset = BoxplotDataset {
            gene_symbol: "A".to_string(),
            young: GroupSamples::default(),
            old: GroupSamples::default(),
        };
        let json = serde_json::to_value(boxplot_figure(&dataset)).unwrap();
        assert_eq!(json["data"][0]["type"], "box");
        assert_eq!(json["layout"]["boxmode"], "group");
        assert_eq!(json["layout"]["yaxis"]["zeroline"], false);
        assert!(json["layout"].get("shapes").is_none());
    }
}
