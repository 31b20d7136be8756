//! Stalled download cleanup
//!
//! Counts a service's queue, fetches it in one page, and removes every record
//! stalled with no connections, asking the service to drop it from the
//! download client and blocklist the release.

use serde::Deserialize;
use serde_json::Value;

use crate::client::ArrClient;

/// Queue status of a stalled record
pub const STALLED_STATUS: &str = "warning";

/// Error message a stalled record reports
pub const STALLED_MESSAGE: &str = "The download is stalled with no connections";

/// Envelope returned by `GET /queue`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePage {
    pub total_records: Option<u64>,
    pub records: Option<Vec<Value>>,
}

/// One entry of a service queue
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub tracked_download_status: Option<String>,
}

impl QueueRecord {
    /// Whether the record reports a stalled download
    pub fn is_stalled(&self) -> bool {
        self.status.as_deref() == Some(STALLED_STATUS)
            && self.error_message.as_deref() == Some(STALLED_MESSAGE)
    }

    /// Whether the record carries every key the scan relies on
    fn is_complete(&self) -> bool {
        self.id.is_some()
            && self.title.is_some()
            && self.status.is_some()
            && self.tracked_download_status.is_some()
    }
}

/// Outcome of scanning one service queue
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Records the page contained
    pub total: usize,
    /// Records checked against the stall predicate
    pub inspected: usize,
    /// Records skipped for missing or invalid keys
    pub skipped: usize,
    /// Records matching the stall predicate
    pub stalled: usize,
    /// Stalled records the service confirmed removing
    pub removed: usize,
}

/// Query for removing a queue item from the client and blocklisting it
pub fn removal_query() -> [(&'static str, String); 2] {
    [
        ("removeFromClient", "true".to_string()),
        ("blocklist", "true".to_string()),
    ]
}

/// Number of records in the service queue
///
/// Returns `None` (after logging) if the count cannot be read.
pub async fn count_records(client: &ArrClient) -> Option<u64> {
    let page = client.get("queue", &[]).await.and_then(parse_page);

    match page {
        Some(QueuePage {
            total_records: Some(total),
            records: Some(_),
        }) => Some(total),
        _ => {
            tracing::warn!(service = %client.kind(), "Could not count queue records");
            None
        }
    }
}

/// Fetch the first `page_size` queue records
///
/// Returns `None` (after logging one warning) if the response is absent or
/// has no `records` key.
pub async fn fetch_queue(client: &ArrClient, page_size: u64) -> Option<Vec<Value>> {
    let query = [("page", "1".to_string()), ("pageSize", page_size.to_string())];

    match client.get("queue", &query).await.and_then(parse_page) {
        Some(QueuePage {
            records: Some(records),
            ..
        }) => Some(records),
        _ => {
            tracing::warn!(
                service = %client.kind(),
                "{} queue is empty or missing \"records\" key",
                client.kind()
            );
            None
        }
    }
}

/// Remove every stalled download from one service's queue
///
/// Returns `None` when the queue could not be read; the cycle then moves on.
pub async fn execute(client: &ArrClient) -> Option<ScanReport> {
    let service = client.kind();
    tracing::info!(service = %service, "Checking {} queue...", service);

    let total = count_records(client).await?;
    if total == 0 {
        tracing::info!(service = %service, "{} queue is empty", service);
        return Some(ScanReport::default());
    }

    let records = fetch_queue(client, total).await?;
    tracing::info!(service = %service, records = records.len(), "Processing {} queue...", service);

    let mut report = ScanReport {
        total: records.len(),
        ..ScanReport::default()
    };

    for raw in records {
        let record = match serde_json::from_value::<QueueRecord>(raw) {
            Ok(record) if record.is_complete() => record,
            _ => {
                tracing::warn!(
                    service = %service,
                    "Skipping item in {} queue due to missing or invalid keys",
                    service
                );
                report.skipped += 1;
                continue;
            }
        };

        report.inspected += 1;
        let title = record.title.as_deref().unwrap_or_default();
        tracing::info!(service = %service, "Checking the status of {}", title);

        if !record.is_stalled() {
            continue;
        }
        report.stalled += 1;

        let Some(id) = record.id else { continue };
        tracing::info!(
            service = %service,
            record_id = id,
            "Removing stalled {} download: {}",
            service,
            title
        );

        if remove_record(client, id).await {
            report.removed += 1;
        }
    }

    tracing::info!(
        service = %service,
        total = report.total,
        skipped = report.skipped,
        stalled = report.stalled,
        removed = report.removed,
        "{} queue cleanup complete",
        service
    );

    Some(report)
}

/// Remove one queue item, blocklisting its release
async fn remove_record(client: &ArrClient, id: i64) -> bool {
    client
        .delete(&format!("queue/{}", id), &removal_query())
        .await
        .is_some()
}

fn parse_page(value: Value) -> Option<QueuePage> {
    serde_json::from_value(value).ok()
}
