// ── Controller ──
//
// Glue between the request client and the UI stores: runs device
// workflows against the backend and writes their results into `AppState`.

use std::sync::Arc;

use inputdeck_api::{ApiClient, ClientConfig, Device, DeviceKind};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::state::AppState;

/// Central facade over the backend and the UI state.
///
/// Every request goes through an [`ApiClient`] whose error sink is the
/// state's [`ErrorLog`](crate::ErrorLog), so a rejected call both returns
/// an error here and shows up in the log.
#[derive(Debug, Clone)]
pub struct Controller {
    api: ApiClient,
    state: Arc<AppState>,
}

impl Controller {
    /// Build a controller whose client reports failures into `state`.
    pub fn new(config: &ClientConfig, state: Arc<AppState>) -> Result<Self, CoreError> {
        let api = ApiClient::new(config, state.error_sink())?;
        Ok(Self { api, state })
    }

    /// Use an already-built client. Its sink is left as configured.
    pub fn with_api(api: ApiClient, state: Arc<AppState>) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    // ── Device list ──────────────────────────────────────────────────

    /// Fetch the device list and replace the store wholesale.
    ///
    /// A selection whose device is gone is cleared; one whose device is
    /// still listed is replaced by the fresh copy.
    pub async fn refresh_devices(&self) -> Result<Arc<Vec<Device>>, CoreError> {
        let devices = self.api.list_devices().await?;
        info!(count = devices.len(), "device list refreshed");

        self.state.available_devices().set(devices);
        self.reconcile_selection();
        Ok(self.state.available_devices().get())
    }

    /// Create a device on the backend and append it to the list.
    pub async fn add_device(&self, kind: DeviceKind) -> Result<Device, CoreError> {
        let device = self.api.add_device(kind).await?;
        info!(device_id = %device.device_id, %kind, "device added");

        let added = device.clone();
        self.state.available_devices().update(move |prev| {
            let mut next = prev.clone();
            next.push(added);
            next
        });
        Ok(device)
    }

    /// Remove a device on the backend, then drop it from the list and
    /// from the selection.
    pub async fn remove_device(&self, device_id: &str) -> Result<(), CoreError> {
        self.api.remove_device(device_id).await?;
        info!(device_id, "device removed");

        self.state
            .available_devices()
            .update(|prev| prev.iter().filter(|d| d.device_id != device_id).cloned().collect());

        let selected = self.state.selected_device().get();
        if selected.iter().any(|d| d.device_id == device_id) {
            self.state.selected_device().set(None);
        }
        Ok(())
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Select a device by id. Only devices currently in the list can be
    /// selected.
    pub fn select_device(&self, device_id: &str) -> Result<Device, CoreError> {
        let device = self
            .state
            .available_devices()
            .get()
            .iter()
            .find(|d| d.device_id == device_id)
            .cloned()
            .ok_or_else(|| CoreError::DeviceNotFound {
                device_id: device_id.to_owned(),
            })?;

        debug!(device_id, "device selected");
        self.state.selected_device().set(Some(device.clone()));
        Ok(device)
    }

    pub fn clear_selection(&self) {
        if self.state.selected_device().get().is_some() {
            self.state.selected_device().set(None);
        }
    }

    fn reconcile_selection(&self) {
        let current = self.state.selected_device().get();
        let Some(selected) = &*current else {
            return;
        };

        let fresh = self
            .state
            .available_devices()
            .get()
            .iter()
            .find(|d| d.device_id == selected.device_id)
            .cloned();

        match fresh {
            Some(device) if device == *selected => {}
            Some(device) => self.state.selected_device().set(Some(device)),
            None => {
                debug!(device_id = %selected.device_id, "selected device disappeared");
                self.state.selected_device().set(None);
            }
        }
    }
}
