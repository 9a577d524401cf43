//! HTTP client initialization.
//!
//! The only HTTP traffic is the certificate transparency search made during
//! discovery.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for candidate discovery.
///
/// Creates a `reqwest::Client` configured with:
/// - The crate's User-Agent
/// - The discovery timeout from the configuration
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.discovery_timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(Arc::new(client))
}
