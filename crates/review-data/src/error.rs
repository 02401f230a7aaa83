//! Fetch error types.

use std::time::Duration;

use thiserror::Error;

/// Why one filter's fetch produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response within the per-request timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Could not reach the endpoint.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other transport failure.
    #[error("request error: {0}")]
    Request(String),

    /// Endpoint answered with a status other than 200.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Deserialization(String),

    /// Body decoded but reported `success` other than 1.
    #[error("endpoint reported success={success}")]
    Unsuccessful { success: i64 },

    /// Body reported success but carried no `query_summary`.
    #[error("response has no query_summary")]
    MissingSummary,
}

impl FetchError {
    /// HTTP status attached to this error, if the endpoint answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_) | Self::Request(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}
