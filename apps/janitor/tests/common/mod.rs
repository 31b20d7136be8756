//! Common test utilities for janitor integration tests
//!
//! Re-exports the shared mock server and builds clients pointed at it.

#![allow(dead_code)]

pub use janitor_test_utils::{MockArrServer, QueueRecordFixture};

use janitor_shared_config::{ArrConfig, ServiceKind};
use queue_janitor::ArrClient;

/// Client for `kind` talking to the mock server
pub fn client_for(server: &MockArrServer, kind: ServiceKind) -> ArrClient {
    let config = ArrConfig::new(kind, server.url(), server.api_key());
    ArrClient::new(config, None).expect("client should build")
}

/// Client for `kind` pointed at a port nothing listens on
pub fn unreachable_client(kind: ServiceKind) -> ArrClient {
    let config = ArrConfig::new(kind, "http://127.0.0.1:1", "unused-key");
    ArrClient::new(config, None).expect("client should build")
}
