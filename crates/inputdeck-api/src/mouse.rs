// Mouse control endpoints
//
// All of these target `/devices/mouse/{id}/...` and answer `{"success": true}`.

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, MouseButton, ScrollDirection};

impl ApiClient {
    /// Move the pointer by a relative offset.
    ///
    /// `POST /devices/mouse/{id}/move_rel` with `{"delta_x", "delta_y"}`
    pub async fn mouse_move_rel(&self, device_id: &str, delta_x: f64, delta_y: f64) -> Result<Ack, Error> {
        debug!(device_id, delta_x, delta_y, "relative mouse move");
        self.mouse_post(
            device_id,
            "move_rel",
            &json!({ "delta_x": delta_x, "delta_y": delta_y }),
        )
        .await
    }

    /// Move the pointer to an absolute position on a screen of the given size.
    ///
    /// `POST /devices/mouse/{id}/move_abs`
    pub async fn mouse_move_abs(
        &self,
        device_id: &str,
        abs_x: f64,
        abs_y: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Result<Ack, Error> {
        debug!(device_id, abs_x, abs_y, "absolute mouse move");
        self.mouse_post(
            device_id,
            "move_abs",
            &json!({
                "abs_x": abs_x,
                "abs_y": abs_y,
                "screen_width": screen_width,
                "screen_height": screen_height,
            }),
        )
        .await
    }

    /// `POST /devices/mouse/{id}/press` with `{"button": "LEFT"}`
    pub async fn mouse_press(&self, device_id: &str, button: MouseButton) -> Result<Ack, Error> {
        debug!(device_id, %button, "mouse press");
        self.mouse_post(device_id, "press", &json!({ "button": button }))
            .await
    }

    /// `POST /devices/mouse/{id}/release` with `{"button": "LEFT"}`
    pub async fn mouse_release(&self, device_id: &str, button: MouseButton) -> Result<Ack, Error> {
        debug!(device_id, %button, "mouse release");
        self.mouse_post(device_id, "release", &json!({ "button": button }))
            .await
    }

    /// Scroll by `distance` along `direction`.
    ///
    /// `POST /devices/mouse/{id}/scroll` with `{"direction", "distance"}`
    pub async fn mouse_scroll(
        &self,
        device_id: &str,
        direction: ScrollDirection,
        distance: f64,
    ) -> Result<Ack, Error> {
        debug!(device_id, %direction, distance, "mouse scroll");
        self.mouse_post(
            device_id,
            "scroll",
            &json!({ "direction": direction, "distance": distance }),
        )
        .await
    }

    async fn mouse_post(
        &self,
        device_id: &str,
        action: &str,
        body: &serde_json::Value,
    ) -> Result<Ack, Error> {
        self.request_as(
            &format!("/devices/mouse/{}/{action}", Self::path_segment(device_id)),
            Method::POST,
            body,
        )
        .await
    }
}
