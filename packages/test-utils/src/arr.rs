//! Mock *arr server for testing queue cleanup
//!
//! Provides a [`MockArrServer`] that simulates the Sonarr/Radarr v3 queue and
//! command endpoints for testing the janitor without a real instance.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Error message a stalled download reports
pub const STALLED_MESSAGE: &str = "The download is stalled with no connections";

/// Mock *arr server for testing the queue janitor
///
/// This struct wraps a [`wiremock::MockServer`] and provides convenience methods
/// for setting up queue, deletion and command responses.
///
/// # Example
///
/// ```rust,ignore
/// use janitor_test_utils::{MockArrServer, QueueRecordFixture};
///
/// #[tokio::test]
/// async fn test_cleanup() {
///     let server = MockArrServer::start().await;
///     server
///         .mock_queue(vec![QueueRecordFixture::stalled(1, "Show.S01E01")])
///         .await;
///     server.expect_delete(1, 1).await;
///
///     // Configure your client with server.url() and server.api_key()
/// }
/// ```
pub struct MockArrServer {
    server: MockServer,
    api_key: String,
}

impl MockArrServer {
    /// Start a new mock server with default API key
    pub async fn start() -> Self {
        Self::start_with_api_key("test-api-key").await
    }

    /// Start a new mock server with custom API key
    pub async fn start_with_api_key(api_key: &str) -> Self {
        let server = MockServer::start().await;
        Self {
            server,
            api_key: api_key.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Access the underlying wiremock server for custom mocks
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Mount the count and page responses for a queue holding `records`
    ///
    /// The count request (no query) and the page request
    /// (`page=1&pageSize=<len>`) both answer with the full record list.
    pub async fn mock_queue(&self, records: Vec<QueueRecordFixture>) {
        let total = records.len();
        let body = json!({
            "page": 1,
            "pageSize": total,
            "totalRecords": total,
            "records": records.iter().map(|r| r.to_json()).collect::<Vec<_>>()
        });

        self.mock_queue_body(body).await;
    }

    /// Mount an arbitrary JSON body for every `GET /queue`
    pub async fn mock_queue_body(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(header("X-Api-Key", self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a count response, then a page response lacking `records`
    pub async fn mock_queue_page_without_records(&self, total: usize) {
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(query_param("page", "1"))
            .and(header("X-Api-Key", self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "totalRecords": total
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(header("X-Api-Key", self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalRecords": total,
                "records": []
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a server error for every `GET /queue`
    pub async fn mock_queue_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Internal Server Error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Expect `times` removals of queue item `id` with client removal and blocklisting
    ///
    /// The removal endpoint answers with an empty body, as the real services do.
    pub async fn expect_delete(&self, id: i64, times: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v3/queue/{}", id)))
            .and(query_param("removeFromClient", "true"))
            .and(query_param("blocklist", "true"))
            .and(header("X-Api-Key", self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Fail every removal with `status`
    pub async fn mock_delete_error(&self, status: u16) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/v3/queue/\d+$"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Expect no removal at all
    pub async fn expect_no_deletes(&self) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/v3/queue/.*$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Expect `times` POSTs of command `name`
    pub async fn expect_command(&self, name: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/api/v3/command"))
            .and(header("X-Api-Key", self.api_key.as_str()))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "name": name })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1,
                "name": name,
                "status": "queued"
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Fail every command POST
    pub async fn mock_command_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/v3/command"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received so far with the given method and path
    pub async fn request_count(&self, http_method: &str, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.to_string() == http_method && r.url.path() == request_path)
            .count()
    }
}

/// Fixture for creating queue record responses
#[derive(Debug, Clone)]
pub struct QueueRecordFixture {
    pub id: i64,
    pub title: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub tracked_download_status: Option<String>,
}

impl QueueRecordFixture {
    /// A healthy, downloading record
    pub fn downloading(id: i64, title: &str) -> Self {
        Self {
            id,
            title: Some(title.to_string()),
            status: Some("downloading".to_string()),
            error_message: None,
            tracked_download_status: Some("ok".to_string()),
        }
    }

    /// A record stalled with no connections
    pub fn stalled(id: i64, title: &str) -> Self {
        Self {
            id,
            title: Some(title.to_string()),
            status: Some("warning".to_string()),
            error_message: Some(STALLED_MESSAGE.to_string()),
            tracked_download_status: Some("warning".to_string()),
        }
    }

    /// A warning record with an error message other than the stall message
    pub fn warning(id: i64, title: &str, message: &str) -> Self {
        let mut record = Self::stalled(id, title);
        record.error_message = Some(message.to_string());
        record
    }

    /// Drop the `trackedDownloadStatus` key from the serialized record
    pub fn without_tracked_status(mut self) -> Self {
        self.tracked_download_status = None;
        self
    }

    /// Convert to JSON value, omitting absent keys
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = json!({ "id": self.id });
        let fields = [
            ("title", &self.title),
            ("status", &self.status),
            ("errorMessage", &self.error_message),
            ("trackedDownloadStatus", &self.tracked_download_status),
        ];
        for (key, field) in fields {
            if let Some(v) = field {
                value[key] = json!(v);
            }
        }
        value
    }
}
