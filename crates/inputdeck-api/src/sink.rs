// Central capture point for HTTP-level failures.

use std::sync::Arc;

use crate::error::ApiFailure;

/// Receives every HTTP-level failure seen by an [`ApiClient`](crate::ApiClient).
///
/// Recording happens before the failure is returned to the caller, so a
/// sink observer never lags behind the call site.
pub trait ErrorSink: Send + Sync {
    fn record(&self, failure: Arc<ApiFailure>);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn record(&self, _failure: Arc<ApiFailure>) {}
}
