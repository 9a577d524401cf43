//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::dns::Batch;
use crate::error_handling::{FailureKind, LookupStats};

/// Logs answer and failure counts for a finished batch.
pub fn print_lookup_statistics(batch: &Batch, stats: &LookupStats) {
    info!(
        "Resolved {} candidate{} in {:.1}s: {} answers, {} failed lookups",
        stats.candidates(),
        if stats.candidates() == 1 { "" } else { "s" },
        batch.elapsed.as_secs_f64(),
        stats.answers(),
        stats.total_failures()
    );

    if stats.total_failures() > 0 {
        info!("Failure Counts ({} total):", stats.total_failures());
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
