#![allow(clippy::unwrap_used)]
// Controller workflows against a wiremock backend.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inputdeck_api::{ApiClient, Error, NoopSink};
use inputdeck_core::{AppState, ClientConfig, Controller, CoreError, DeviceKind};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let config = ClientConfig {
        origin: Url::parse(&server.uri()).unwrap(),
        ..ClientConfig::default()
    };
    let controller = Controller::new(&config, Arc::new(AppState::new())).unwrap();
    (server, controller)
}

fn device(id: &str, kind: &str) -> serde_json::Value {
    json!({
        "client_id": "127.0.0.1",
        "device_id": id,
        "device_nodes": [format!("/dev/input/event{id}")],
        "type": kind
    })
}

async fn mount_devices(server: &MockServer, devices: serde_json::Value) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.0/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })))
        .mount(server)
        .await;
}

fn ids(controller: &Controller) -> Vec<String> {
    controller
        .state()
        .available_devices()
        .get()
        .iter()
        .map(|d| d.device_id.clone())
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_replaces_list_in_server_order() {
    let (server, controller) = setup().await;
    mount_devices(&server, json!([device("3", "MOUSE"), device("1", "KEYBOARD")])).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let out = Arc::clone(&seen);
    let _sub = controller
        .state()
        .available_devices()
        .subscribe(move |list| out.lock().unwrap().push(list.len()));

    let devices = controller.refresh_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(ids(&controller), vec!["3", "1"]);
    assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
    assert!(controller.state().errors().is_empty());
}

#[tokio::test]
async fn test_failed_call_reaches_caller_and_error_log() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.0/devices"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "device not found" })),
        )
        .mount(&server)
        .await;

    let banner = Arc::new(Mutex::new(Vec::new()));
    let out = Arc::clone(&banner);
    let _sub = controller.state().errors().subscribe(move |entries| {
        if let Some(last) = entries.last() {
            out.lock().unwrap().push(last.message.clone());
        }
    });

    let err = controller.refresh_devices().await.unwrap_err();

    assert!(matches!(err, CoreError::Api(Error::Http(_))), "got: {err:?}");
    assert_eq!(err.to_string(), "device not found");
    assert_eq!(controller.state().errors().messages(), vec!["device not found"]);
    assert_eq!(*banner.lock().unwrap(), vec!["device not found"]);
    assert!(Arc::ptr_eq(
        err.as_failure().unwrap(),
        &controller.state().errors().entries()[0]
    ));
    // The list is untouched on failure.
    assert!(controller.state().available_devices().get().is_empty());
}

#[tokio::test]
async fn test_add_device_appends() {
    let (server, controller) = setup().await;
    mount_devices(&server, json!([device("1", "KEYBOARD")])).await;
    controller.refresh_devices().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1.0/devices/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device("2", "MOUSE")))
        .mount(&server)
        .await;

    let added = controller.add_device(DeviceKind::Mouse).await.unwrap();

    assert_eq!(added.device_id, "2");
    assert_eq!(ids(&controller), vec!["1", "2"]);
}

#[tokio::test]
async fn test_remove_device_clears_matching_selection() {
    let (server, controller) = setup().await;
    mount_devices(&server, json!([device("1", "KEYBOARD"), device("2", "MOUSE")])).await;
    controller.refresh_devices().await.unwrap();
    controller.select_device("2").unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/v1.0/devices/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    controller.remove_device("2").await.unwrap();

    assert_eq!(ids(&controller), vec!["1"]);
    assert!(controller.state().selected_device().get().is_none());
}

#[tokio::test]
async fn test_select_unknown_device_is_rejected() {
    let (_server, controller) = setup().await;

    let err = controller.select_device("missing").unwrap_err();

    assert!(matches!(err, CoreError::DeviceNotFound { ref device_id } if device_id == "missing"));
    assert!(controller.state().selected_device().get().is_none());
    // Local validation never touches the error log.
    assert!(controller.state().errors().is_empty());
}

#[tokio::test]
async fn test_refresh_reconciles_selection() {
    let (server, controller) = setup().await;
    mount_devices(&server, json!([device("1", "KEYBOARD"), device("2", "MOUSE")])).await;
    controller.refresh_devices().await.unwrap();
    controller.select_device("1").unwrap();

    // Same id, new nodes: selection follows the fresh copy.
    mount_devices(
        &server,
        json!([{
            "client_id": "127.0.0.1",
            "device_id": "1",
            "device_nodes": ["/dev/input/event99"],
            "type": "KEYBOARD"
        }, device("2", "MOUSE")]),
    )
    .await;
    controller.refresh_devices().await.unwrap();
    let selected = controller.state().selected_device().get();
    assert_eq!(
        (*selected).as_ref().unwrap().device_nodes,
        vec!["/dev/input/event99"]
    );

    // Gone from the backend: selection is cleared.
    mount_devices(&server, json!([device("2", "MOUSE")])).await;
    controller.refresh_devices().await.unwrap();
    assert!(controller.state().selected_device().get().is_none());
}

#[tokio::test]
async fn test_clear_selection() {
    let (server, controller) = setup().await;
    mount_devices(&server, json!([device("1", "KEYBOARD")])).await;
    controller.refresh_devices().await.unwrap();
    controller.select_device("1").unwrap();

    controller.clear_selection();

    assert!(controller.state().selected_device().get().is_none());
}

#[tokio::test]
async fn test_with_api_uses_the_clients_own_sink() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let config = ClientConfig {
        origin: Url::parse(&server.uri()).unwrap(),
        ..ClientConfig::default()
    };
    let api = ApiClient::new(&config, Arc::new(NoopSink)).unwrap();
    let controller = Controller::with_api(api, Arc::new(AppState::new()));

    let err = controller.refresh_devices().await.unwrap_err();

    assert_eq!(err.to_string(), "Internal Server Error");
    assert!(controller.state().errors().is_empty());
}

#[tokio::test]
async fn test_raw_request_failure_lands_in_state_error_log() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.0/devices/x"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "device not found" })),
        )
        .mount(&server)
        .await;

    let err = controller.api().get("/devices/x").await.unwrap_err();

    assert_eq!(err.to_string(), "device not found");
    assert_eq!(controller.state().errors().messages(), vec!["device not found"]);
}
