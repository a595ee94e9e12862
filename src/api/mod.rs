use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{BoxplotResponse, GeneInfoResponse, VolcanoDataset};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// The three read-only endpoints behind the dashboard.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ExpressionApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the full volcano dataset.
    async fn volcano_data(&self) -> Result<VolcanoDataset, ApiError>;

    /// Fetch per-group expression values for one gene.
    async fn boxplot_data(&self, gene: &str) -> Result<BoxplotResponse, ApiError>;

    /// Fetch related publications for one gene.
    async fn gene_info(&self, gene: &str) -> Result<GeneInfoResponse, ApiError>;
}
