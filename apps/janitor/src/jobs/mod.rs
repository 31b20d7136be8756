//! Cleanup cycle steps
//!
//! This module contains the per-service tasks a cycle runs:
//! - Stalled download removal
//! - Import list sync and missing episode search commands

pub mod commands;
pub mod queue_cleanup;

pub use commands::{trigger, ArrCommand};
pub use queue_cleanup::{QueueRecord, ScanReport};
