//! Integration tests for a full cleanup cycle over both services

mod common;

use std::time::Duration;

use common::{client_for, unreachable_client, MockArrServer, QueueRecordFixture};
use janitor_shared_config::{ArrConfig, ServiceKind};
use queue_janitor::{run_loop, ArrClient, CycleReport, Janitor};
use serde_json::{json, Value};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

/// Both queues are cleaned and all three commands are sent
#[tokio::test]
async fn test_full_cycle() {
    let sonarr = MockArrServer::start_with_api_key("sonarr-key").await;
    let radarr = MockArrServer::start_with_api_key("radarr-key").await;

    sonarr
        .mock_queue(vec![
            QueueRecordFixture::stalled(11, "Show.S02E01"),
            QueueRecordFixture::downloading(12, "Show.S02E02"),
        ])
        .await;
    radarr
        .mock_queue(vec![QueueRecordFixture::stalled(21, "Movie (1999)")])
        .await;

    sonarr.expect_delete(11, 1).await;
    radarr.expect_delete(21, 1).await;
    sonarr.expect_command("ImportListSync", 1).await;
    sonarr.expect_command("missingEpisodeSearch", 1).await;
    radarr.expect_command("ImportListSync", 1).await;
    radarr.expect_command("missingEpisodeSearch", 0).await;

    let janitor = Janitor::from_clients(
        client_for(&sonarr, ServiceKind::Sonarr),
        client_for(&radarr, ServiceKind::Radarr),
    );
    let report = janitor.run_cycle().await;

    assert_eq!(report.sonarr.map(|r| r.removed), Some(1));
    assert_eq!(report.radarr.map(|r| r.removed), Some(1));
    assert_eq!(report.commands_accepted, 3);
    assert_eq!(report.commands_failed, 0);
}

/// Scans run before commands, service A before service B, episode search last
#[tokio::test]
async fn test_cycle_order() {
    // One server for both services, service B mounted under /radarr
    let server = MockArrServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^(/radarr)?/api/v3/queue$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRecords": 1,
            "records": [QueueRecordFixture::stalled(1, "Stalled").to_json()]
        })))
        .mount(server.inner())
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^(/radarr)?/api/v3/queue/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server.inner())
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^(/radarr)?/api/v3/command$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .mount(server.inner())
        .await;

    let sonarr = client_for(&server, ServiceKind::Sonarr);
    let radarr = ArrClient::new(
        ArrConfig::new(
            ServiceKind::Radarr,
            format!("{}/radarr", server.url()),
            server.api_key(),
        ),
        None,
    )
    .unwrap();

    let report = Janitor::from_clients(sonarr, radarr).run_cycle().await;
    assert_eq!(report.commands_accepted, 3);

    let requests = server.inner().received_requests().await.unwrap();
    let sequence: Vec<String> = requests
        .iter()
        .map(|r| {
            let line = format!("{} {}", r.method, r.url.path());
            match serde_json::from_slice::<Value>(&r.body) {
                Ok(body) => match body["name"].as_str() {
                    Some(name) => format!("{} {}", line, name),
                    None => line,
                },
                Err(_) => line,
            }
        })
        .collect();

    assert_eq!(
        sequence,
        vec![
            "GET /api/v3/queue",
            "GET /api/v3/queue",
            "DELETE /api/v3/queue/1",
            "GET /radarr/api/v3/queue",
            "GET /radarr/api/v3/queue",
            "DELETE /radarr/api/v3/queue/1",
            "POST /api/v3/command ImportListSync",
            "POST /radarr/api/v3/command ImportListSync",
            "POST /api/v3/command missingEpisodeSearch",
        ]
    );
}

/// An unreachable service does not stop the rest of the cycle
#[tokio::test]
async fn test_unreachable_service_does_not_stop_cycle() {
    let radarr = MockArrServer::start().await;
    radarr
        .mock_queue(vec![QueueRecordFixture::stalled(5, "Movie (2005)")])
        .await;
    radarr.expect_delete(5, 1).await;
    radarr.expect_command("ImportListSync", 1).await;

    let janitor = Janitor::from_clients(
        unreachable_client(ServiceKind::Sonarr),
        client_for(&radarr, ServiceKind::Radarr),
    );
    let report = janitor.run_cycle().await;

    assert!(report.sonarr.is_none());
    assert_eq!(report.radarr.map(|r| r.removed), Some(1));
    assert_eq!(report.commands_accepted, 1);
    assert_eq!(report.commands_failed, 2);
}

/// Command failures are counted, never fatal
#[tokio::test]
async fn test_command_failures_are_reported() {
    let sonarr = MockArrServer::start().await;
    let radarr = MockArrServer::start().await;
    sonarr.mock_queue(vec![]).await;
    radarr.mock_queue(vec![]).await;
    sonarr.mock_command_error(500).await;
    radarr.mock_command_error(500).await;

    let janitor = Janitor::from_clients(
        client_for(&sonarr, ServiceKind::Sonarr),
        client_for(&radarr, ServiceKind::Radarr),
    );

    assert_eq!(
        janitor.run_cycle().await,
        CycleReport {
            sonarr: Some(Default::default()),
            radarr: Some(Default::default()),
            commands_accepted: 0,
            commands_failed: 3,
        }
    );
}

/// The loop keeps cycling after a cycle in which every call failed
#[tokio::test]
async fn test_loop_survives_failed_cycles() {
    let janitor = Janitor::from_clients(
        unreachable_client(ServiceKind::Sonarr),
        unreachable_client(ServiceKind::Radarr),
    );

    let completed = run_loop(Duration::from_millis(10), Some(2), || janitor.run_cycle()).await;
    assert_eq!(completed, 2);
}
