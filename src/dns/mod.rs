//! Concurrent multi-record DNS resolution.
//!
//! This module is the resolution engine:
//! - [`resolve_record`]: one record kind for one name, failures folded into outcomes
//! - [`resolve_candidate`]: every configured kind for one name, concurrently
//! - [`resolve_batch`]: one task per candidate, fanned in over a channel
//!
//! Lookups go through the [`DnsLookup`] trait, implemented for
//! `hickory-resolver`'s `TokioAsyncResolver`.

mod batch;
mod candidate;
mod lookup;
mod records;
mod types;

// Re-export public API
pub use batch::{resolve_batch, Batch, BatchOptions};
pub use candidate::resolve_candidate;
pub use lookup::DnsLookup;
pub use records::resolve_record;
pub use types::{CandidateReport, RecordData, RecordKind, RecordOutcome};
