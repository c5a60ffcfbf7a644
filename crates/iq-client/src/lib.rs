//! # iq-client
//!
//! HTTP client for the forecasting service plus the controller that turns
//! user intent into requests and reducer actions.
//!
//! ## Modules
//!
//! - `api` - typed calls to `/upload`, `/forecast`, `/skus`
//! - `controller` - orchestrates requests against the app state
//! - `schedule` - cancellable interval tasks (count-up, loading messages, polling)

pub mod api;
pub mod controller;
pub mod schedule;

pub use api::*;
pub use controller::*;
pub use schedule::*;

use iq_core::UploadError;
use thiserror::Error;

/// Default forecasting service URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const UPLOAD_PATH: &str = "/upload";
pub const FORECAST_PATH: &str = "/forecast";
pub const SKUS_PATH: &str = "/skus";

// ============================================================================
// ERRORS
// ============================================================================

/// Everything that can go wrong talking to the forecasting service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Backend not connected ({0})")]
    Network(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Validation(#[from] UploadError),
    #[error("Select an SKU")]
    MissingSku,
}

impl ClientError {
    /// Failed before anything was sent
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingSku)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Forecasting service client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in milliseconds (0 = none)
    pub request_timeout_ms: u32,
    /// Interval between `/skus` refreshes in milliseconds (0 = fetch once)
    pub catalog_poll_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("IQ_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            request_timeout_ms: 30_000,
            catalog_poll_ms: 0,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout_ms: u32) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn poll_catalog(mut self, interval_ms: u32) -> Self {
        self.catalog_poll_ms = interval_ms;
        self
    }

    /// Local development service, catalog fetched once
    pub fn local() -> Self {
        Self::new(DEFAULT_API_URL)
    }

    /// Shared deployment where other users upload data (refresh every 30s)
    pub fn live(base_url: impl Into<String>) -> Self {
        Self::new(base_url).poll_catalog(30_000)
    }

    /// Absolute URL of an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config() {
        let config = ApiConfig::new("http://forecast.internal:9000/")
            .timeout(5000)
            .poll_catalog(60_000);

        assert_eq!(config.endpoint(FORECAST_PATH), "http://forecast.internal:9000/forecast");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.catalog_poll_ms, 60_000);
    }

    #[test]
    fn test_default_polls_once() {
        let config = ApiConfig::default();
        assert_eq!(config.catalog_poll_ms, 0);
        assert!(config.endpoint(SKUS_PATH).ends_with("/skus"));
    }

    #[test]
    fn test_presets() {
        assert_eq!(ApiConfig::local().base_url, DEFAULT_API_URL);
        assert_eq!(ApiConfig::live("https://iq.example.com").catalog_poll_ms, 30_000);
    }

    #[test]
    fn test_error_messages() {
        let err = ClientError::from(UploadError::NoFile);
        assert_eq!(err.to_string(), "Select a CSV file first");
        assert!(err.is_client_side());

        let server = ClientError::Server {
            status: 500,
            message: "Insufficient data".into(),
        };
        assert_eq!(server.to_string(), "Insufficient data");
        assert!(!server.is_client_side());
    }
}
