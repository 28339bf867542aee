// ── Core error types ──
//
// Request errors pass through untouched so callers can still match on
// `inputdeck_api::Error::Http` and see the captured failure.

use std::sync::Arc;

use inputdeck_api::ApiFailure;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] inputdeck_api::Error),

    #[error("Device not found: {device_id}")]
    DeviceNotFound { device_id: String },
}

impl CoreError {
    /// The HTTP failure behind this error, if the backend rejected the call.
    pub fn as_failure(&self) -> Option<&Arc<ApiFailure>> {
        match self {
            Self::Api(err) => err.as_failure(),
            Self::DeviceNotFound { .. } => None,
        }
    }
}
