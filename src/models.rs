//! Wire data model
//!
//! Shapes of the three JSON endpoints consumed by the dashboard.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One measured protein on the volcano plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolcanoPoint {
    pub gene_symbol: String,
    /// log2 fold-change between the two conditions.
    #[serde(rename = "logFC")]
    pub log_fc: f64,
    pub neg_log10_pval: f64,
    pub significant: bool,
}

/// Response of `/api/volcano-data`, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolcanoDataset {
    pub points: Vec<VolcanoPoint>,
}

impl VolcanoDataset {
    #[cfg(test)]
    pub fn new(points: Vec<VolcanoPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Observations for one sample group of a boxplot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSamples {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

#[cfg(test)]
impl GroupSamples {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotDataset {
    pub gene_symbol: String,
    pub young: GroupSamples,
    pub old: GroupSamples,
}

/// An empty `error` string does not mark the error shape, so the body is
/// decoded as data instead.
fn non_empty_error<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let error = String::deserialize(deserializer)?;
    if error.is_empty() {
        return Err(de::Error::custom("empty error message"));
    }
    Ok(error)
}

/// Response of `/api/boxplot-data/{gene}`.
///
/// The error shape is tried first, so a body carrying a non-empty `error` is
/// always a domain error even if it also carries data fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxplotResponse {
    Error {
        #[serde(deserialize_with = "non_empty_error")]
        error: String,
    },
    Data(BoxplotDataset),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub url: String,
}

/// Gene identifiers arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_id: Option<GeneId>,
    #[serde(default)]
    pub publications: Vec<Publication>,
}

/// Response of `/api/gene-info/{gene}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneInfoResponse {
    Error {
        #[serde(deserialize_with = "non_empty_error")]
        error: String,
    },
    Data(GeneInfo),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volcano_point_uses_wire_field_names() {
        let json = r#"{"points": [
            {"gene_symbol": "APOE", "logFC": -2.5, "neg_log10_pval": 3.0, "significant": true}
        ]}"#;
        let dataset: VolcanoDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.points[0].log_fc, -2.5);
        assert!(dataset.points[0].significant);
    }

    #[test]
    fn boxplot_error_shape_wins() {
        let response: BoxplotResponse =
            serde_json::from_str(r#"{"error": "Gene XYZ not found"}"#).unwrap();
        assert_eq!(
            response,
            BoxplotResponse::Error {
                error: "Gene XYZ not found".to_string()
            }
        );
    }

    #[test]
    fn boxplot_data_keeps_group_statistics() {
        let json = r#"{
            "gene_symbol": "GDF15",
            "young": {"group": "Young", "values": [1.0, 2.0], "mean": 1.5, "std": 0.5},
            "old": {"values": [3.0]}
        }"#;
        let BoxplotResponse::Data(dataset) = serde_json::from_str(json).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(dataset.young.mean, Some(1.5));
        assert_eq!(dataset.old.values, vec![3.0]);
        assert_eq!(dataset.old.group, None);
    }

    #[test]
    fn gene_info_without_publications_defaults_to_empty() {
        let response: GeneInfoResponse =
            serde_json::from_str(r#"{"gene_symbol": "GDF15", "gene_id": "9518"}"#).unwrap();
        let GeneInfoResponse::Data(info) = response else {
            panic!("expected data");
        };
        assert!(info.publications.is_empty());
        assert_eq!(info.gene_id, Some(GeneId::Text("9518".to_string())));
    }

    #[test]
    fn gene_info_accepts_numeric_gene_id() {
        let response: GeneInfoResponse = serde_json::from_str(
            r#"{"gene_symbol": "GDF15", "gene_id": 9518, "publications": []}"#,
        )
        .unwrap();
        let GeneInfoResponse::Data(info) = response else {
            panic!("expected data");
        };
        assert_eq!(info.gene_id, Some(GeneId::Number(9518)));
    }

    #[test]
    fn empty_error_string_is_not_an_error() {
        let response: GeneInfoResponse = serde_json::from_str(
            r#"{"error": "", "publications": [{"title": "T", "url": "https://example.org/t"}]}"#,
        )
        .unwrap();
        let GeneInfoResponse::Data(info) = response else {
            panic!("expected data, got {:?}", response);
        };
        assert_eq!(info.publications.len(), 1);

        let response: GeneInfoResponse =
            serde_json::from_str(r#"{"error": "", "publications": []}"#).unwrap();
        assert!(matches!(response, GeneInfoResponse::Data(_)));
    }
}
