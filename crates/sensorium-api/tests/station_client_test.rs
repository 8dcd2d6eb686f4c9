// Integration tests for `StationClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sensorium_api::{Error, StationClient, WaterLevel};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, StationClient) {
    let server = MockServer::start().await;
    let endpoint = format!("{}/data_endpoint", server.uri());
    let client = StationClient::from_reqwest(&endpoint, reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_reading() {
    let (server, client) = setup().await;

    let body = json!({
        "temperature": 23.5,
        "humidity": 60,
        "air_quality": 400,
        "water_level": 1
    });

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let reading = client.fetch_reading().await.unwrap();

    assert_eq!(reading.temperature, 23.5);
    assert_eq!(reading.humidity, 60.0);
    assert_eq!(reading.air_quality, 400.0);
    assert_eq!(reading.water_level, WaterLevel::High);
}

#[tokio::test]
async fn test_fetch_reading_low_water() {
    let (server, client) = setup().await;

    let body = json!({
        "temperature": 18,
        "humidity": 45,
        "air_quality": 120,
        "water_level": 0
    });

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let reading = client.fetch_reading().await.unwrap();
    assert_eq!(reading.water_level, WaterLevel::Low);
    assert_eq!(reading.water_level.label(), "Low");
}

// ── Failure taxonomy ────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.fetch_reading().await.unwrap_err();
    match err {
        Error::Status { status } => assert_eq!(status, 500),
        other => panic!("expected Status error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_non_json_body_is_decode_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_reading().await.unwrap_err();
    match err {
        Error::Decode { body, .. } => assert!(body.contains("oops")),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_field_is_decode_failure() {
    let (server, client) = setup().await;

    // No air_quality field
    let body = json!({
        "temperature": 20,
        "humidity": 50,
        "water_level": 0
    });

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    assert!(matches!(
        client.fetch_reading().await.unwrap_err(),
        Error::Decode { .. }
    ));
}

#[tokio::test]
async fn test_undefined_water_level_code_is_decode_failure() {
    let (server, client) = setup().await;

    let body = json!({
        "temperature": 20,
        "humidity": 50,
        "air_quality": 100,
        "water_level": 3
    });

    Mock::given(method("GET"))
        .and(path("/data_endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let err = client.fetch_reading().await.unwrap_err();
    match err {
        Error::Decode { message, .. } => {
            assert!(message.contains("unknown water level code 3"));
        }
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    // Port with no listener. A dropped `MockServer` won't do: wiremock
    // pools its servers, so the listener outlives the handle and answers
    // 404 instead of refusing the connection. Bind-and-drop a plain
    // `TcpListener` to get a port that is actually dead.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let endpoint = format!("http://127.0.0.1:{port}/data_endpoint");

    let client = StationClient::from_reqwest(&endpoint, reqwest::Client::new()).unwrap();
    let err = client.fetch_reading().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.is_transient());
}
