//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, discovery, lookup)
//! - Resolver error categorization
//! - Lookup statistics tracking
//!
//! Only initialization and discovery errors are fatal. Lookup errors are
//! stored on the outcome they belong to and counted by [`LookupStats`].

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_resolve_error, ResolveFailure};
pub use stats::LookupStats;
pub use types::{DiscoveryError, FailureKind, InitializationError, LookupError, UnknownRecordKind};
