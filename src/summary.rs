//! Selection summary shown next to the volcano plot

use crate::plot::PointClick;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    pub gene: String,
    pub log_fc: f64,
    /// Adjusted p-value reconstructed from the plotted -log10 value.
    pub p_value: f64,
}

impl SelectionSummary {
    pub fn from_click(click: &PointClick) -> Self {
        Self {
            gene: click.text.clone(),
            log_fc: click.x,
            p_value: 10f64.powf(-click.y),
        }
    }

    /// log2 fold change with three decimals.
    pub fn log_fc_display(&self) -> String {
        format!("{:.3}", self.log_fc)
    }

    /// p-value in scientific notation with three fractional digits, e.g. `1.000e-3`.
    pub fn p_value_display(&self) -> String {
        format!("{:.3e}", self.p_value)
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Selected Protein: {}", self.gene),
            format!("log2 Fold Change: {}", self.log_fc_display()),
            format!("Adjusted P-Value: {}", self.p_value_display()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: f64, y: f64) -> PointClick {
        PointClick {
            curve_number: 1,
            point_number: 0,
            x,
            y,
            text: "APOE".to_string(),
        }
    }

    #[test]
    fn reconstructs_p_value_from_plotted_height() {
        let summary = SelectionSummary::from_click(&click(-2.5, 3.0));
        assert!((summary.p_value - 0.001).abs() < 1e-15);
        assert_eq!(summary.p_value_display(), "1.000e-3");
        assert_eq!(summary.log_fc_display(), "-2.500");
    }

    #[test]
    fn summary_lines_name_the_gene() {
        let summary = SelectionSummary::from_click(&click(1.23456, 1.30103));
        let [gene, fc, p] = summary.lines();
        assert_eq!(gene, "Selected Protein: APOE");
        assert_eq!(fc, "log2 Fold Change: 1.235");
        assert_eq!(p, "Adjusted P-Value: 5.000e-2");
    }
}
