// ── Captured request failures ──
//
// Append-only store of every HTTP-level failure, shared by the request
// client (as its `ErrorSink`) and whatever displays errors.

use std::sync::Arc;

use inputdeck_api::{ApiFailure, ErrorSink};
use tracing::debug;

use crate::store::{Store, StoreStream, Subscription};

/// Snapshot of the log: failures in the order they were recorded.
pub type ErrorEntries = Vec<Arc<ApiFailure>>;

/// Append-only, observable log of request failures.
///
/// Entries are never removed by the core; a UI that wants to dismiss
/// errors keeps its own cursor into the log.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Store<ErrorEntries>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure and notify subscribers.
    pub fn push(&self, failure: Arc<ApiFailure>) {
        debug!(endpoint = %failure.endpoint, "recording request failure");
        self.entries.update(move |prev| {
            let mut next = Vec::with_capacity(prev.len() + 1);
            next.extend(prev.iter().cloned());
            next.push(failure);
            next
        });
    }

    pub fn entries(&self) -> Arc<ErrorEntries> {
        self.entries.get()
    }

    /// Messages of every entry, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries().iter().map(|f| f.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ErrorEntries) + Send + Sync + 'static,
    {
        self.entries.subscribe(callback)
    }

    pub fn watch(&self) -> StoreStream<ErrorEntries> {
        self.entries.watch()
    }
}

impl ErrorSink for ErrorLog {
    fn record(&self, failure: Arc<ApiFailure>) {
        self.push(failure);
    }
}
