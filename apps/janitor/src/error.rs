//! Error handling for the queue janitor
//!
//! Every failure talking to a managed service is captured as a
//! [`JanitorError`], logged once, and then dropped: the cleanup cycle treats
//! a failed call as "skip this step" and carries on.

use janitor_shared_config::ServiceKind;
use thiserror::Error;

/// Main janitor error type
#[derive(Error, Debug)]
pub enum JanitorError {
    // ========== HTTP/External Service Errors ==========
    /// Transport-level failure (connection refused, DNS, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("{service} API error: {status_code} - {message}")]
    Api {
        service: ServiceKind,
        status_code: u16,
        message: String,
    },

    /// Response body was not valid JSON
    #[error("failed to parse JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl JanitorError {
    /// Create a service API error
    pub fn api(service: ServiceKind, status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            service,
            status_code,
            message: message.into(),
        }
    }

    /// Create a JSON decode error for `url`
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Log the error against the request it came from
    ///
    /// Transient and permanent failures are reported the same way.
    pub fn log(&self, service: ServiceKind, url: &str) {
        tracing::error!(
            service = %service,
            url = url,
            error = %self,
            "Error making API request"
        );
    }
}

/// Result type alias for janitor operations
pub type JanitorResult<T> = Result<T, JanitorError>;
