//! Queue janitor library
//!
//! Periodically cleans stalled downloads out of a series manager's and a
//! movie manager's queues, then asks both to sync their import lists and the
//! series manager to search for missing episodes.

pub mod client;
pub mod config;
pub mod error;
pub mod jobs;
pub mod scheduler;
pub mod telemetry;

// Re-export commonly used types
pub use client::{ArrClient, HttpMethod};
pub use config::Config;
pub use error::{JanitorError, JanitorResult};
pub use scheduler::{run_loop, CycleReport, Janitor};
