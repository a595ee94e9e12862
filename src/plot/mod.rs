//! Declarative figure contract
//!
//! A [`Figure`] is traces + layout + config, serialized with Plotly's field
//! names. Renderers (the terminal dashboard, or any Plotly host reading an
//! exported file) consume figures; nothing else talks to a charting library.

pub mod boxplot;
pub mod stats;
pub mod volcano;

use serde::Serialize;

pub use boxplot::boxplot_figure;
pub use volcano::volcano_figure;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    #[serde(rename = "data")]
    pub traces: Vec<Trace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Box(BoxTrace),
}

/// Point markers with index-aligned `x`, `y` and `text` arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

/// One box-and-whisker column. `x` repeats the category once per value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub boxpoints: String,
    pub jitter: f64,
    pub pointpos: f64,
    pub boxmean: bool,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxmode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub zeroline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zerolinecolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
}

/// A straight overlay segment in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub line: ShapeLine,
}

impl Shape {
    pub fn line(x0: f64, y0: f64, x1: f64, y1: f64, line: ShapeLine) -> Self {
        Self {
            kind: "line".to_string(),
            x0,
            x1,
            y0,
            y1,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeLine {
    pub color: String,
    pub width: u32,
    pub dash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotConfig {
    pub responsive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self { responsive: true }
    }
}

/// What a renderer reports when a scatter point is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct PointClick {
    /// Index of the trace holding the point.
    pub curve_number: usize,
    /// Index of the point inside its trace.
    pub point_number: usize,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Figure {
    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.traces.iter().filter_map(|trace| match trace {
            Trace::Scatter(scatter) => Some(scatter),
            Trace::Box(_) => None,
        })
    }

    pub fn box_traces(&self) -> impl Iterator<Item = &BoxTrace> {
        self.traces.iter().filter_map(|trace| match trace {
            Trace::Box(boxed) => Some(boxed),
            Trace::Scatter(_) => None,
        })
    }

    /// The click a renderer would emit for the given scatter point.
    pub fn click_at(&self, curve_number: usize, point_number: usize) -> Option<PointClick> {
        let Some(Trace::Scatter(trace)) = self.traces.get(curve_number) else {
            return None;
        };
        Some(PointClick {
            curve_number,
            point_number,
            x: *trace.x.get(point_number)?,
            y: *trace.y.get(point_number)?,
            text: trace.text.get(point_number)?.clone(),
        })
    }

    /// The click for the first scatter point labelled `text`.
    pub fn find_point(&self, text: &str) -> Option<PointClick> {
        self.traces
            .iter()
            .enumerate()
            .find_map(|(curve_number, trace)| match trace {
                Trace::Scatter(scatter) => scatter
                    .text
                    .iter()
                    .position(|label| label == text)
                    .and_then(|point_number| self.click_at(curve_number, point_number)),
                Trace::Box(_) => None,
            })
    }

    /// Number of points in the trace at `curve_number`.
    pub fn trace_len(&self, curve_number: usize) -> usize {
        match self.traces.get(curve_number) {
            Some(Trace::Scatter(trace)) => trace.x.len(),
            Some(Trace::Box(trace)) => trace.y.len(),
            None => 0,
        }
    }
}
