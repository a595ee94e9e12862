//! Figure export
//!
//! Writes the figures the dashboard would draw as Plotly JSON, so any Plotly
//! host can render them unchanged.

use crate::api::ExpressionApi;
use crate::api::error::ApiError;
use crate::models::Publication;
use crate::outcome::Outcome;
use crate::plot::{boxplot_figure, volcano_figure};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const VOLCANO_FILE: &str = "volcano.json";
pub const BOXPLOT_FILE: &str = "boxplot.json";
pub const GENE_INFO_FILE: &str = "gene-info.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
struct GeneInfoExport<'a> {
    gene: &'a str,
    outcome: &'a Outcome<Vec<Publication>>,
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

/// Fetch and write the volcano figure, plus the per-gene panels when `gene` is given.
///
/// `boxplot.json` is only written when the server returned expression data.
/// Returns the written paths in order.
pub async fn export_figures(
    api: &dyn ExpressionApi,
    out_dir: &Path,
    gene: Option<&str>,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let dataset = api.volcano_data().await?;
    let mut written = vec![write_json(
        out_dir.join(VOLCANO_FILE),
        &volcano_figure(&dataset),
    )?];

    let Some(gene) = gene else {
        return Ok(written);
    };
    if !dataset.points.iter().any(|point| point.gene_symbol == gene) {
        log::warn!("{} is not on the volcano plot", gene);
    }

    match Outcome::from(api.boxplot_data(gene).await?) {
        Outcome::Data(boxplot) => {
            written.push(write_json(
                out_dir.join(BOXPLOT_FILE),
                &boxplot_figure(&boxplot),
            )?);
        }
        Outcome::Error(message) => log::warn!("No boxplot for {}: {}", gene, message),
        Outcome::Empty => log::warn!("No boxplot for {}", gene),
    }

    let info = Outcome::from(api.gene_info(gene).await?);
    written.push(write_json(
        out_dir.join(GENE_INFO_FILE),
        &GeneInfoExport {
            gene,
            outcome: &info,
        },
    )?);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockExpressionApi;
    use crate::models::{
        BoxplotDataset, BoxplotResponse, GeneId, GeneInfo, GeneInfoResponse, GroupSamples,
        VolcanoDataset, VolcanoPoint,
    };
    use tempfile::tempdir;

    fn api_with_volcano() -> MockExpressionApi {
        let mut api = MockExpressionApi::new();
        api.expect_volcano_data().times(1).returning(|| {
            Ok(VolcanoDataset::new(vec![VolcanoPoint {
                gene_symbol: "APOE".to_string(),
                log_fc: -2.5,
                neg_log10_pval: 3.0,
                significant: true,
            }]))
        });
        api
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn writes_only_volcano_without_gene() {
        let dir = tempdir().unwrap();
        let api = api_with_volcano();

        let written = export_figures(&api, dir.path(), None).await.unwrap();
        assert_eq!(written, vec![dir.path().join(VOLCANO_FILE)]);

        let json = read_json(&written[0]);
        assert_eq!(json["data"][1]["name"], "Significant");
        assert_eq!(json["config"]["responsive"], true);
    }

    #[tokio::test]
    async fn writes_boxplot_and_gene_info_for_gene() {
        let dir = tempdir().unwrap();
        let mut api = api_with_volcano();
        api.expect_boxplot_data()
            .withf(|gene| gene == "APOE")
            .returning(|_| {
                Ok(BoxplotResponse::Data(BoxplotDataset {
                    gene_symbol: "APOE".to_string(),
                    young: GroupSamples::from_values(vec![1.0]),
                    old: GroupSamples::from_values(vec![2.0]),
                }))
            });
        api.expect_gene_info().returning(|_| {
            Ok(GeneInfoResponse::Data(GeneInfo {
                gene_symbol: Some("APOE".to_string()),
                gene_id: Some(GeneId::Number(348)),
                publications: Vec::new(),
            }))
        });

        let written = export_figures(&api, dir.path(), Some("APOE")).await.unwrap();
        assert_eq!(written.len(), 3);

        let boxplot = read_json(&dir.path().join(BOXPLOT_FILE));
        assert_eq!(boxplot["data"][0]["type"], "box");
        assert_eq!(boxplot["layout"]["title"], "Protein Expression: APOE");

        let info = read_json(&dir.path().join(GENE_INFO_FILE));
        assert_eq!(info["gene"], "APOE");
        assert_eq!(info["outcome"]["status"], "empty");
    }

    #[tokio::test]
    async fn domain_error_skips_boxplot_file() {
        let dir = tempdir().unwrap();
        let mut api = api_with_volcano();
        api.expect_boxplot_data().returning(|_| {
            Ok(BoxplotResponse::Error {
                error: "gene not found".to_string(),
            })
        });
        api.expect_gene_info().returning(|_| {
            Ok(GeneInfoResponse::Error {
                error: "gene not found".to_string(),
            })
        });

        export_figures(&api, dir.path(), Some("XYZ")).await.unwrap();
        assert!(!dir.path().join(BOXPLOT_FILE).exists());

        let info = read_json(&dir.path().join(GENE_INFO_FILE));
        assert_eq!(info["outcome"]["status"], "error");
        assert_eq!(info["outcome"]["payload"], "gene not found");
    }

    #[tokio::test]
    async fn volcano_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut api = MockExpressionApi::new();
        api.expect_volcano_data().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let result = export_figures(&api, dir.path(), None).await;
        assert!(matches!(result, Err(ExportError::Api(ApiError::Http { status: 500, .. }))));
        assert!(!dir.path().join(VOLCANO_FILE).exists());
    }
}
