//! Candidate discovery.
//!
//! Produces the list of names handed to the resolution engine: the root
//! domain first, then every subdomain a [`CandidateSource`] knows about.
//! Discovery failures are fatal to the run.

mod crtsh;
mod names;

use std::future::Future;

use log::info;

use crate::error_handling::DiscoveryError;

pub use crtsh::CrtShSource;
pub use names::{normalize_candidates, validate_domain};

/// A source of names below a root domain.
pub trait CandidateSource: Send + Sync {
    /// Returns raw names seen for `root`. Names may repeat, differ in case,
    /// carry wildcard prefixes or fall outside `root`; callers normalize them.
    fn discover(
        &self,
        root: &str,
    ) -> impl Future<Output = Result<Vec<String>, DiscoveryError>> + Send;
}

/// How discovered names become candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryPolicy {
    /// Only resolve the root domain; the source is never contacted
    pub top_only: bool,
    /// Keep repeated names instead of collapsing them case-insensitively
    pub keep_duplicates: bool,
}

/// Builds the candidate list for `root`.
///
/// # Returns
///
/// A non-empty list whose first element is the normalized root domain.
///
/// # Errors
///
/// Returns `DiscoveryError::InvalidDomain` for a malformed root and any error
/// raised by the source.
pub async fn discover_candidates<S: CandidateSource>(
    source: &S,
    root: &str,
    policy: DiscoveryPolicy,
) -> Result<Vec<String>, DiscoveryError> {
    let root = validate_domain(root)?;
    if policy.top_only {
        info!("Subdomain discovery skipped; resolving {root} only");
        return Ok(vec![root]);
    }

    let names = source.discover(&root).await?;
    let seen = names.len();
    let candidates = normalize_candidates(&root, names, policy.keep_duplicates);
    info!(
        "Discovered {} candidate{} for {} ({} raw names)",
        candidates.len(),
        if candidates.len() == 1 { "" } else { "s" },
        root,
        seen
    );
    Ok(candidates)
}
