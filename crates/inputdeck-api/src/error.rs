use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Top-level error type for the `inputdeck-api` crate.
///
/// Only [`Error::Http`] is normalized and recorded in the client's
/// [`ErrorSink`](crate::ErrorSink). Every other variant reaches the caller
/// unmodified and is never captured centrally.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP ────────────────────────────────────────────────────────
    /// The backend answered with a non-success status.
    ///
    /// Displays as the bare failure message so callers and error-log
    /// subscribers see the same text.
    #[error(transparent)]
    Http(Arc<ApiFailure>),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// A success response whose body is not the expected JSON,
    /// with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The captured failure, if this error came from a non-success status.
    pub fn as_failure(&self) -> Option<&Arc<ApiFailure>> {
        match self {
            Self::Http(failure) => Some(failure),
            _ => None,
        }
    }

    /// HTTP status of the failure, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(failure) => Some(failure.status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// An HTTP-level failure captured by the request client.
///
/// The same `Arc` is handed to the error sink and returned to the caller,
/// so both observers hold the identical failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// `{"error": ...}` from the body, or the status reason text.
    pub message: String,
    pub status: StatusCode,
    pub method: Method,
    /// Endpoint as passed by the caller, without the API prefix.
    pub endpoint: String,
    pub occurred_at: DateTime<Utc>,
}

impl ApiFailure {
    pub fn new(
        message: impl Into<String>,
        status: StatusCode,
        method: Method,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            status,
            method,
            endpoint: endpoint.into(),
            occurred_at: Utc::now(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiFailure {}
