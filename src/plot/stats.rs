//! Box statistics for renderers that draw boxes themselves
//!
//! Quartiles use linear interpolation between order statistics, and the
//! whiskers stop at the furthest observation within 1.5 IQR of the box.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub count: usize,
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

impl BoxStats {
    /// Statistics over the finite values, or `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Some(Self {
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[count - 1],
            lower_whisker: sorted.iter().copied().find(|v| *v >= low_fence).unwrap_or(q1),
            upper_whisker: sorted
                .iter()
                .rev()
                .copied()
                .find(|v| *v <= high_fence)
                .unwrap_or(q3),
            mean,
            std: variance.sqrt(),
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate_linearly() {
        let stats = BoxStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std - 1.118_033_988_749_895).abs() < 1e-12);
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
    }

    #[test]
    fn single_and_empty_inputs() {
        let stats = BoxStats::from_values(&[7.0]).unwrap();
        assert_eq!((stats.q1, stats.median, stats.q3), (7.0, 7.0, 7.0));
        assert_eq!(stats.std, 0.0);
        assert!(BoxStats::from_values(&[]).is_none());
        assert!(BoxStats::from_values(&[f64::NAN]).is_none());
    }
}
