//! Server integration tests that run against a real TCP listener.
//!
//! The router-level tests cover the endpoints; these check that the
//! assembled service behaves the same behind an actual socket.

mod common;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use common::fixtures::{expected, png_bytes, red_blue_image};
use common::MockHttpServer;
use markerpick::models::AppConfig;
use markerpick::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server(config: AppConfig) -> u16 {
    let state = create_app_state(config).expect("Failed to create app state");
    state.preload_catalog().await;
    let app = build_router(state);

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    port
}

async fn raw_request(port: u16, request: &str) -> String {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to connect");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("Failed to read response");
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server(AppConfig::default()).await;

    let response = raw_request(
        port,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.ends_with("OK"));
}

#[tokio::test]
async fn test_api_error_over_tcp_is_json() {
    let port = start_test_server(AppConfig::default()).await;

    let body = "{\"image_id\": \"missing\"}";
    let request = format!(
        "POST /api/pick HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let response = raw_request(port, &request).await;

    assert!(response.starts_with("HTTP/1.1 404"), "got: {response}");
    assert!(response.to_lowercase().contains("cache-control: no-store"));
    assert!(response.contains("\"status\":404"));
}

/// Load a remote image and pick a pixel through a real HTTP client.
#[tokio::test]
async fn test_full_pick_flow() {
    let upstream = MockHttpServer::start().await;
    upstream
        .mock_png("/photo.png", png_bytes(&red_blue_image(1600, 900)))
        .await;
    let port = start_test_server(AppConfig::default()).await;
    let base = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    let body = serde_json::json!({ "url": upstream.url_for("/photo.png") }).to_string();
    let response = client
        .post(format!("{base}/api/images"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("load request failed");
    assert_eq!(response.status().as_u16(), 200);
    let loaded: serde_json::Value =
        serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
    let id = loaded["image_id"].as_str().unwrap().to_string();

    let preview = client
        .get(format!("{base}{}", loaded["preview_url"].as_str().unwrap()))
        .send()
        .await
        .expect("preview request failed");
    assert_eq!(preview.status().as_u16(), 200);
    assert_eq!(
        preview.headers().get("content-type").unwrap(),
        "image/png"
    );

    let body = serde_json::json!({ "image_id": id, "x": 100.0, "y": 100.0 }).to_string();
    let response = client
        .post(format!("{base}/api/pick"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("pick request failed");
    assert_eq!(response.status().as_u16(), 200);

    let picked: serde_json::Value =
        serde_json::from_slice(&response.bytes().await.unwrap()).unwrap();
    assert_eq!(picked["status"], "matched");
    let names: Vec<&str> = picked["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, expected::RED_TOP5);
}
