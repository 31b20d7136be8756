//! Shared test utilities for the queue janitor workspace
//!
//! This crate provides a mock *arr server for testing without network
//! dependencies on a real Sonarr or Radarr instance.
//!
//! # Example
//!
//! ```rust,ignore
//! use janitor_test_utils::{MockArrServer, QueueRecordFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let server = MockArrServer::start().await;
//!     server.mock_queue(vec![QueueRecordFixture::stalled(1, "Show")]).await;
//!
//!     // Use server.url() to configure your client
//! }
//! ```

mod arr;

pub use arr::{MockArrServer, QueueRecordFixture, STALLED_MESSAGE};
