// Device lifecycle endpoints
//
// Listing, creating and removing virtual input devices.

use reqwest::Method;
use tracing::debug;

use crate::client::{ApiClient, EmptyBody};
use crate::error::Error;
use crate::models::{Ack, AddDeviceRequest, Device, DeviceKind, DeviceList};

impl ApiClient {
    /// List every device the backend currently exposes, in server order.
    ///
    /// `GET /devices` → `{"devices": [...]}`
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        debug!("listing devices");
        let list: DeviceList = self
            .request_as("/devices", Method::GET, &EmptyBody {})
            .await?;
        Ok(list.devices)
    }

    /// Ask the backend to create a new device.
    ///
    /// `POST /devices/add` with `{"type": "MOUSE"}`
    pub async fn add_device(&self, kind: DeviceKind) -> Result<Device, Error> {
        debug!(%kind, "adding device");
        self.request_as("/devices/add", Method::POST, &AddDeviceRequest { kind })
            .await
    }

    /// Remove a device and its host nodes.
    ///
    /// `DELETE /devices/{device_id}`
    pub async fn remove_device(&self, device_id: &str) -> Result<Ack, Error> {
        debug!(device_id, "removing device");
        self.request_as(
            &format!("/devices/{}", Self::path_segment(device_id)),
            Method::DELETE,
            &EmptyBody {},
        )
        .await
    }
}
