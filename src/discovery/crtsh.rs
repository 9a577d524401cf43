//! Certificate transparency discovery through the crt.sh JSON search.

use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

use super::CandidateSource;
use crate::error_handling::DiscoveryError;

/// One certificate identity row. `name_value` may hold several names
/// separated by newlines (one per SAN entry).
#[derive(Debug, Deserialize)]
struct CtEntry {
    name_value: String,
}

/// Queries a crt.sh-compatible endpoint for every name ending in `.<root>`.
pub struct CrtShSource {
    client: Arc<reqwest::Client>,
    endpoint: Url,
}

impl CrtShSource {
    /// Creates a source for `endpoint` (for example `https://crt.sh`).
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::InvalidEndpoint` if `endpoint` is not a URL.
    pub fn new(client: Arc<reqwest::Client>, endpoint: &str) -> Result<Self, DiscoveryError> {
        let endpoint = Url::parse(endpoint).map_err(|source| DiscoveryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(CrtShSource { client, endpoint })
    }

    /// Search URL for `root`: `?q=%.<root>&output=json`.
    fn search_url(&self, root: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &format!("%.{root}"))
            .append_pair("output", "json");
        url
    }
}

impl CandidateSource for CrtShSource {
    async fn discover(&self, root: &str) -> Result<Vec<String>, DiscoveryError> {
        let url = self.search_url(root);
        info!("Querying certificate transparency logs for {root}");
        debug!("Discovery request: {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        // An empty body means no certificates were ever logged
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<CtEntry> = serde_json::from_str(&body)?;
        Ok(entries
            .into_iter()
            .flat_map(|entry| {
                entry
                    .name_value
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect())
    }
}
