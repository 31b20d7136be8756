//! HTTP client for the *arr v3 REST API
//!
//! [`ArrClient`] issues one request per call with the service API key and a
//! JSON content type. The typed [`ArrClient::try_request`] is wrapped by
//! [`ArrClient::request`], which logs any failure and yields `None` instead.

use std::fmt;
use std::time::Duration;

use janitor_shared_config::{ArrConfig, ServiceKind};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{JanitorError, JanitorResult};

/// Header carrying the service API key
const API_KEY_HEADER: &str = "X-Api-Key";

/// Request methods the janitor issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// Client bound to a single managed service
#[derive(Clone)]
pub struct ArrClient {
    http_client: Client,
    config: ArrConfig,
}

impl fmt::Debug for ArrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrClient")
            .field("config", &self.config)
            .finish()
    }
}

impl ArrClient {
    /// Create a client for `config`
    ///
    /// Without a `timeout` the transport default applies.
    pub fn new(config: ArrConfig, timeout: Option<Duration>) -> JanitorResult<Self> {
        let mut builder = Client::builder().user_agent("QueueJanitor/1.0");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    /// Which service this client talks to
    pub fn kind(&self) -> ServiceKind {
        self.config.kind
    }

    /// Perform one request and parse the JSON body
    ///
    /// An empty 2xx body parses as `Value::Null`.
    #[instrument(skip(self, query, payload), fields(service = %self.config.kind))]
    pub async fn try_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        payload: Option<&Value>,
    ) -> JanitorResult<Value> {
        let url = self.config.api_url(path);

        let mut request = self
            .http_client
            .request(method.as_reqwest(), &url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JanitorError::api(self.config.kind, status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        debug!(%method, %url, status = status.as_u16(), len = bytes.len(), "API response");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| JanitorError::decode(url, e))
    }

    /// Perform one request, logging any failure and returning `None` for it
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        payload: Option<&Value>,
    ) -> Option<Value> {
        match self.try_request(method, path, query, payload).await {
            Ok(value) => Some(value),
            Err(e) => {
                e.log(self.config.kind, &self.config.api_url(path));
                None
            }
        }
    }

    /// `GET {path}?{query}`
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Option<Value> {
        self.request(HttpMethod::Get, path, query, None).await
    }

    /// `POST {path}` with a JSON body
    pub async fn post(&self, path: &str, payload: &Value) -> Option<Value> {
        self.request(HttpMethod::Post, path, &[], Some(payload)).await
    }

    /// `DELETE {path}?{query}`
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Option<Value> {
        self.request(HttpMethod::Delete, path, query, None).await
    }
}
