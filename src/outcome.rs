//! Tagged response outcomes
//!
//! Every per-gene response is folded into an [`Outcome`] once, at the
//! pipeline boundary, so each panel has a single match over three states.

use crate::models::{BoxplotDataset, BoxplotResponse, GeneInfoResponse, Publication};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The server answered with an explicit `error` field.
    Error(String),
    /// A valid answer with nothing to show.
    Empty,
    Data(T),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Error(message) => Outcome::Error(message),
            Outcome::Empty => Outcome::Empty,
            Outcome::Data(data) => Outcome::Data(f(data)),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Short label used in activity log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Error(_) => "error",
            Outcome::Empty => "empty",
            Outcome::Data(_) => "data",
        }
    }
}

impl From<BoxplotResponse> for Outcome<BoxplotDataset> {
    fn from(response: BoxplotResponse) -> Self {
        match response {
            BoxplotResponse::Error { error } if error.is_empty() => Outcome::Empty,
            BoxplotResponse::Error { error } => Outcome::Error(error),
            BoxplotResponse::Data(dataset) => Outcome::Data(dataset),
        }
    }
}

impl From<GeneInfoResponse> for Outcome<Vec<Publication>> {
    fn from(response: GeneInfoResponse) -> Self {
        match response {
            GeneInfoResponse::Error { error } if error.is_empty() => Outcome::Empty,
            GeneInfoResponse::Error { error } => Outcome::Error(error),
            GeneInfoResponse::Data(info) if info.publications.is_empty() => Outcome::Empty,
            GeneInfoResponse::Data(info) => Outcome::Data(info.publications),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneInfo;

    #[test]
    fn gene_info_has_three_terminal_states() {
        let error: Outcome<Vec<Publication>> = GeneInfoResponse::Error {
            error: "Gene not found".to_string(),
        }
        .into();
        assert_eq!(error, Outcome::Error("Gene not found".to_string()));

        let empty: Outcome<Vec<Publication>> = GeneInfoResponse::Data(GeneInfo::default()).into();
        assert_eq!(empty, Outcome::Empty);

        let publication = Publication {
            title: "GDF15 and aging".to_string(),
            url: "https://pubmed.ncbi.nlm.nih.gov/123".to_string(),
        };
        let data: Outcome<Vec<Publication>> = GeneInfoResponse::Data(GeneInfo {
            publications: vec![publication.clone()],
            ..Default::default()
        })
        .into();
        assert_eq!(data, Outcome::Data(vec![publication]));
    }

    #[test]
    fn blank_error_reads_as_no_publications() {
        let response: GeneInfoResponse =
            serde_json::from_str(r#"{"error": "", "publications": []}"#).unwrap();
        assert_eq!(Outcome::from(response), Outcome::Empty);

        let blank: Outcome<Vec<Publication>> = GeneInfoResponse::Error {
            error: String::new(),
        }
        .into();
        assert_eq!(blank, Outcome::Empty);
    }

    #[test]
    fn serializes_with_status_tag() {
        let outcome: Outcome<Vec<Publication>> = Outcome::Empty;
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"status":"empty"}"#
        );
        let outcome: Outcome<Vec<Publication>> = Outcome::Error("nope".to_string());
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"status":"error","payload":"nope"}"#
        );
    }
}
