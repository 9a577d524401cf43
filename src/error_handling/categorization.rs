//! Resolver error categorization.
//!
//! Maps `hickory-resolver` errors onto [`LookupError`], separating "the name
//! has no records of this type" (an empty answer, not a failure) from real
//! failures.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;

use super::types::LookupError;

/// Result of classifying a resolver error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// NOERROR with no records of the requested type.
    NoRecords,
    /// Anything that should be reported as a failed outcome.
    Failed(LookupError),
}

/// Categorizes a `ResolveError`.
///
/// NXDOMAIN becomes [`LookupError::NoSuchDomain`], resolver timeouts become
/// [`LookupError::TimedOut`] with a zero duration (the configured timeout is
/// applied separately), everything else keeps the resolver's message.
pub fn categorize_resolve_error(error: &ResolveError) -> ResolveFailure {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                ResolveFailure::Failed(LookupError::NoSuchDomain)
            } else {
                ResolveFailure::NoRecords
            }
        }
        ResolveErrorKind::Timeout => {
            ResolveFailure::Failed(LookupError::TimedOut(std::time::Duration::ZERO))
        }
        _ => ResolveFailure::Failed(LookupError::Resolve(error.to_string())),
    }
}
