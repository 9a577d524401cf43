//! Main application helpers.
//!
//! Interrupt handling and end-of-run statistics used by the binary and the
//! `run_dump` entry point.

pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use shutdown::{cancel_on_interrupt, shutdown_gracefully};
pub use statistics::print_lookup_statistics;
