//! End-to-end tests for the full vcontrold stack.
//!
//! Each test runs a mock heat pump (mockito), the real reqwest client, the
//! real JSON catalogue store in a temporary directory, the real integration
//! services and the real axum router, exercised via
//! `tower::ServiceExt::oneshot`: no TCP port is bound for the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mockito::{Mock, Server, ServerGuard};
use tower::ServiceExt;

use vcontrol_adapter_http_axum::router;
use vcontrol_adapter_http_axum::state::AppState;
use vcontrol_adapter_http_reqwest::{EndpointConfig, VControlClient};
use vcontrol_adapter_storage_json::JsonCatalogueStore;
use vcontrol_app::event_bus::InProcessEventBus;
use vcontrol_app::services::integration::VControlIntegration;
use vcontrol_domain::error::{DeviceError, SetupStage, VControlError};
use vcontrol_domain::event::EventType;

type Integration = VControlIntegration<VControlClient, JsonCatalogueStore, Arc<InProcessEventBus>>;

const FIELDS: &str = r#"[
    {"name": "Aussentemperatur", "measurement": "temperature", "unit": "°C"},
    {"name": "DruckHeissgas", "measurement": "pressure", "unit": "bar"}
]"#;

const DUMP: &str = r#"{
    "Aussentemperatur": {"raw": 5.3, "unit": "°C"},
    "DruckHeissgas": {"raw": 12.1, "unit": "bar"}
}"#;

fn endpoint(server: &ServerGuard) -> EndpointConfig {
    let host_port = server.host_with_port();
    let (host, port) = host_port.rsplit_once(':').unwrap();
    EndpointConfig {
        host: host.to_string(),
        port: port.to_string(),
        path: "/api/vcontrol".to_string(),
        timeout_secs: 2,
    }
}

async fn mock_get(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn integration(
    server: &ServerGuard,
    dir: &tempfile::TempDir,
) -> (Integration, Arc<InProcessEventBus>) {
    let client = VControlClient::new(&endpoint(server)).unwrap();
    let store = JsonCatalogueStore::new(dir.path().join("catalogue.json"));
    let event_bus = Arc::new(InProcessEventBus::new(64));
    let integration = VControlIntegration::new(
        client,
        store,
        Arc::clone(&event_bus),
        Duration::from_secs(60),
    );
    (integration, event_bus)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_publish_device_values_end_to_end() {
    let mut server = Server::new_async().await;
    let _fields = mock_get(&mut server, "/api/vcontrol/commands", 200, FIELDS).await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 200, "{}").await;
    let _dump = mock_get(&mut server, "/api/vcontrol/commands/all", 200, DUMP).await;
    let dir = tempfile::tempdir().unwrap();
    let (mut integration, event_bus) = integration(&server, &dir);

    let sensors = integration.setup().await.unwrap();
    let app = router::build(AppState::new(sensors, event_bus));

    let (status, body) = get_json(app.clone(), "/api/values").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["values"],
        serde_json::json!({
            "vcontrol_Aussentemperatur": 5.3,
            "vcontrol_DruckHeissgas": 12.1,
        })
    );
    assert_eq!(body["stale"], false);

    let (status, body) = get_json(app, "/api/sensors/vcontrol_Aussentemperatur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "°C");
    assert_eq!(body["measurement"], "temperature");
    assert_eq!(body["value"], 5.3);

    integration.teardown().await;
}

#[tokio::test]
async fn should_persist_catalogue_of_first_poll() {
    let mut server = Server::new_async().await;
    let _fields = mock_get(&mut server, "/api/vcontrol/commands", 200, FIELDS).await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 200, "{}").await;
    let _dump = mock_get(&mut server, "/api/vcontrol/commands/all", 200, DUMP).await;
    let dir = tempfile::tempdir().unwrap();
    let (mut integration, _) = integration(&server, &dir);

    integration.setup().await.unwrap();

    let document: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("catalogue.json")).unwrap())
            .unwrap();
    assert_eq!(document["version"], 1);
    let keys: Vec<_> = document["data"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["vcontrol_Aussentemperatur", "vcontrol_DruckHeissgas"]);
}

// ---------------------------------------------------------------------------
// Drift across restarts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_drift_against_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("catalogue.json"),
        r#"{"version": 1, "key": "vcontrol.catalogue", "data": {
            "vcontrol_A": {"name": "A", "first_seen": "2024-01-01T00:00:00Z"},
            "vcontrol_B": {"name": "B", "first_seen": "2024-01-01T00:00:00Z"}
        }}"#,
    )
    .unwrap();

    let mut server = Server::new_async().await;
    let _fields = mock_get(
        &mut server,
        "/api/vcontrol/commands",
        200,
        r#"[{"name": "B"}, {"name": "C"}]"#,
    )
    .await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 200, "{}").await;
    let _dump = mock_get(
        &mut server,
        "/api/vcontrol/commands/all",
        200,
        r#"{"B": {"raw": 1}, "C": {"raw": "an"}}"#,
    )
    .await;
    let (mut integration, event_bus) = integration(&server, &dir);
    let mut events = event_bus.subscribe();

    integration.setup().await.unwrap();

    let drift = loop {
        let event = events.recv().await.unwrap();
        if event.event_type == EventType::CatalogueDrift {
            break event;
        }
    };
    assert_eq!(drift.data["added"], serde_json::json!(["vcontrol_C"]));
    assert_eq!(drift.data["removed"], serde_json::json!(["vcontrol_A"]));

    let document: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("catalogue.json")).unwrap())
            .unwrap();
    let keys: Vec<_> = document["data"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["vcontrol_A", "vcontrol_B", "vcontrol_C"]);
    assert_eq!(
        document["data"]["vcontrol_A"]["first_seen"],
        "2024-01-01T00:00:00Z"
    );
}

#[tokio::test]
async fn should_publish_values_and_rewrite_unreadable_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("catalogue.json"),
        r#"{"version": 2, "key": "vcontrol.catalogue", "data": {}}"#,
    )
    .unwrap();

    let mut server = Server::new_async().await;
    let _fields = mock_get(&mut server, "/api/vcontrol/commands", 200, FIELDS).await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 200, "{}").await;
    let _dump = mock_get(&mut server, "/api/vcontrol/commands/all", 200, DUMP).await;
    let (mut integration, event_bus) = integration(&server, &dir);

    let sensors = integration.setup().await.unwrap();
    let app = router::build(AppState::new(sensors, event_bus));

    let (status, body) = get_json(app, "/api/values").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["values"]["vcontrol_DruckHeissgas"], 12.1);
    assert_eq!(body["stale"], false);

    let document: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("catalogue.json")).unwrap())
            .unwrap();
    assert_eq!(document["version"], 1);
    let keys: Vec<_> = document["data"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["vcontrol_Aussentemperatur", "vcontrol_DruckHeissgas"]);
}

#[tokio::test]
async fn should_ignore_blank_field_names_in_dump() {
    let mut server = Server::new_async().await;
    let _fields = mock_get(&mut server, "/api/vcontrol/commands", 200, FIELDS).await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 200, "{}").await;
    let _dump = mock_get(
        &mut server,
        "/api/vcontrol/commands/all",
        200,
        r#"{"Aussentemperatur": {"raw": 5.3}, " ": {"raw": 2}}"#,
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let (mut integration, _) = integration(&server, &dir);

    let sensors = integration.setup().await.unwrap();

    let values = sensors.snapshot().values;
    assert_eq!(values.len(), 1);
    assert!(values.keys().all(|key| key.as_str() == "vcontrol_Aussentemperatur"));
}

// ---------------------------------------------------------------------------
// Setup failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_fail_setup_when_device_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = VControlClient::new(&EndpointConfig {
        host: "127.0.0.1".to_string(),
        port: port.to_string(),
        ..EndpointConfig::default()
    })
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut integration = VControlIntegration::new(
        client,
        JsonCatalogueStore::new(dir.path().join("catalogue.json")),
        Arc::new(InProcessEventBus::new(8)),
        Duration::from_secs(60),
    );

    let err = integration.setup().await.unwrap_err();

    assert!(matches!(
        err,
        VControlError::Setup {
            stage: SetupStage::LoadSensors,
            ..
        }
    ));
    assert!(matches!(err.as_device(), Some(DeviceError::Unreachable { .. })));
    assert!(integration.sensors().is_none());
}

#[tokio::test]
async fn should_not_fetch_dump_when_status_check_fails() {
    let mut server = Server::new_async().await;
    let _fields = mock_get(&mut server, "/api/vcontrol/commands", 200, FIELDS).await;
    let _status = mock_get(&mut server, "/api/vcontrol/status", 500, "").await;
    let dump = server
        .mock("GET", "/api/vcontrol/commands/all")
        .with_status(200)
        .with_body(DUMP)
        .expect(0)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let (mut integration, _) = integration(&server, &dir);

    let err = integration.setup().await.unwrap_err();

    assert!(matches!(
        err,
        VControlError::Setup {
            stage: SetupStage::FirstRefresh,
            ..
        }
    ));
    assert!(matches!(
        err.as_device(),
        Some(DeviceError::Protocol { status: 500, .. })
    ));
    dump.assert_async().await;
    assert!(!dir.path().join("catalogue.json").exists());
}
