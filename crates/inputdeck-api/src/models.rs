// Wire types for the device REST API.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// One virtual input device exposed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Address of the client that created the device.
    pub client_id: String,
    /// Backend identifier. Sent as a string or a bare integer depending
    /// on the server build; always held as a string here.
    #[serde(deserialize_with = "string_or_integer")]
    pub device_id: String,
    /// Device nodes created on the host, e.g. `/dev/input/event12`.
    #[serde(default)]
    pub device_nodes: Vec<String>,
    /// Device type as reported, e.g. `"MOUSE"`.
    #[serde(rename = "type")]
    pub device_type: String,
}

impl Device {
    /// Parse the reported type, if it is one this client knows about.
    pub fn kind(&self) -> Option<DeviceKind> {
        self.device_type.parse().ok()
    }
}

/// `GET /devices` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Body of a failed response: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorPayload {
    pub error: String,
}

/// `{"success": true}` returned by mutating endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// Kinds of device the backend can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    Joypad,
    PenTablet,
    Trackpad,
    TouchScreen,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddDeviceRequest {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Side,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
}

fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Integer(u64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(s) => s,
        Repr::Integer(n) => n.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_accepts_string_id() {
        let device: Device = serde_json::from_value(json!({
            "client_id": "127.0.0.1",
            "device_id": "42",
            "device_nodes": ["/dev/input/event3"],
            "type": "MOUSE"
        }))
        .unwrap();
        assert_eq!(device.device_id, "42");
        assert_eq!(device.kind(), Some(DeviceKind::Mouse));
    }

    #[test]
    fn device_accepts_integer_id() {
        let device: Device = serde_json::from_value(json!({
            "client_id": "10.0.0.2",
            "device_id": 18_446_744_073_709_551_000_u64,
            "device_nodes": [],
            "type": "TOUCH_SCREEN"
        }))
        .unwrap();
        assert_eq!(device.device_id, "18446744073709551000");
        assert_eq!(device.kind(), Some(DeviceKind::TouchScreen));
    }

    #[test]
    fn unknown_device_type_is_kept_verbatim() {
        let device: Device = serde_json::from_value(json!({
            "client_id": "c",
            "device_id": "1",
            "type": "STEERING_WHEEL"
        }))
        .unwrap();
        assert!(device.device_nodes.is_empty());
        assert_eq!(device.device_type, "STEERING_WHEEL");
        assert_eq!(device.kind(), None);
    }

    #[test]
    fn device_kind_serializes_screaming_snake() {
        let body = serde_json::to_value(AddDeviceRequest {
            kind: DeviceKind::PenTablet,
        })
        .unwrap();
        assert_eq!(body, json!({ "type": "PEN_TABLET" }));
        assert_eq!("pen_tablet".parse::<DeviceKind>().unwrap(), DeviceKind::PenTablet);
    }
}
