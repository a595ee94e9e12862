//! Expression API Client
//!
//! A reqwest client for the volcano, boxplot and gene-info endpoints.

use crate::api::ExpressionApi;
use crate::api::error::ApiError;
use crate::config::Config;
use crate::consts::dash_consts::network;
use crate::environment::Environment;
use crate::models::{BoxplotResponse, GeneInfoResponse, VolcanoDataset};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("proteo-dash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    /// Client with the default connect timeout and no request timeout.
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        Self::with_timeouts(environment, network::default_connect_timeout(), None)
    }

    /// Client honouring the timeouts of a config file, falling back to defaults.
    pub fn from_config(environment: Environment, config: Option<&Config>) -> Result<Self, ApiError> {
        let Some(config) = config else {
            return Self::new(environment);
        };
        let connect = config
            .connect_timeout()
            .unwrap_or_else(network::default_connect_timeout);
        Self::with_timeouts(environment, connect, config.request_timeout())
    }

    pub fn with_timeouts(
        environment: Environment,
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = ClientBuilder::new().connect_timeout(connect_timeout);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Endpoint for a per-gene resource, with the gene escaped as one path segment.
    fn gene_endpoint(base: &str, gene: &str) -> Result<String, ApiError> {
        if gene.trim().is_empty() {
            return Err(ApiError::InvalidGene);
        }
        Ok(format!("{}/{}", base, urlencoding::encode(gene)))
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl ExpressionApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn volcano_data(&self) -> Result<VolcanoDataset, ApiError> {
        self.get_request(network::VOLCANO_ENDPOINT).await
    }

    async fn boxplot_data(&self, gene: &str) -> Result<BoxplotResponse, ApiError> {
        let endpoint = Self::gene_endpoint(network::BOXPLOT_ENDPOINT, gene)?;
        self.get_request(&endpoint).await
    }

    async fn gene_info(&self, gene: &str) -> Result<GeneInfoResponse, ApiError> {
        let endpoint = Self::gene_endpoint(network::GENE_INFO_ENDPOINT, gene)?;
        self.get_request(&endpoint).await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live expression API to run.
mod live_api_tests {
    use crate::api::ExpressionApi;
    use crate::environment::Environment;
    use crate::models::BoxplotResponse;

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should return the full volcano dataset.
    async fn test_volcano_data() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        match client.volcano_data().await {
            Ok(dataset) => println!("Got {} points", dataset.len()),
            Err(e) => panic!("Failed to get volcano data: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should answer an unknown gene with the error shape.
    async fn test_unknown_gene_is_domain_error() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        let response = client.boxplot_data("NOT-A-GENE").await.unwrap();
        assert!(matches!(response, BoxplotResponse::Error { .. }));
    }
}
