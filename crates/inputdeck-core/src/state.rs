// ── Application state ──
//
// The three UI-facing stores, owned by one context object that is passed
// to whoever needs it.

use std::sync::Arc;

use inputdeck_api::{Device, ErrorSink};

use crate::error_log::ErrorLog;
use crate::store::Store;

/// UI state shared between the controller and views.
///
/// Created once with an empty device list, no selection, and an empty
/// error log. Values are only ever replaced through the stores.
#[derive(Debug, Default)]
pub struct AppState {
    available_devices: Store<Vec<Device>>,
    selected_device: Store<Option<Device>>,
    errors: Arc<ErrorLog>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every device the backend exposes, in server order.
    pub fn available_devices(&self) -> &Store<Vec<Device>> {
        &self.available_devices
    }

    /// The device the UI is focused on, held by value.
    pub fn selected_device(&self) -> &Store<Option<Device>> {
        &self.selected_device
    }

    pub fn errors(&self) -> &Arc<ErrorLog> {
        &self.errors
    }

    /// The error log as a sink for an `ApiClient`.
    pub fn error_sink(&self) -> Arc<dyn ErrorSink> {
        Arc::<ErrorLog>::clone(&self.errors)
    }
}
