//! Error handling for the expression API module

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body was not the JSON shape the endpoint promises.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Per-gene endpoints need a non-empty gene symbol.
    #[error("Gene symbol must not be empty")]
    InvalidGene,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Classify error and determine appropriate log level
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong endpoint or proxy in front of the API
            ApiError::Http { .. } => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,

            // Contract violations
            ApiError::Decode(_) | ApiError::InvalidGene => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_status() {
        let server = ApiError::Http {
            status: 503,
            message: "busy".to_string(),
        };
        assert_eq!(server.log_level(), LogLevel::Warn);

        let missing = ApiError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(missing.log_level(), LogLevel::Error);
        assert_eq!(ApiError::InvalidGene.log_level(), LogLevel::Error);
    }

    #[test]
    fn decode_errors_are_errors() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::from(err);
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(err.to_string().starts_with("Decoding error"));
    }
}
