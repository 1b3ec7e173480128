//! Integration tests for the click-to-match flow.

mod common;

use axum::http::StatusCode;
use common::fixtures::{expected, png_bytes, red_blue_image, solid_image};
use common::{assert_api_error, assert_matches, assert_ok, MockHttpServer, TestApp};
use pretty_assertions::assert_eq;

/// Serve a 1600x900 red|blue image and load it; returns (app, image_id)
async fn loaded_red_blue(server: &MockHttpServer) -> (TestApp, String) {
    server
        .mock_png("/red-blue.png", png_bytes(&red_blue_image(1600, 900)))
        .await;
    let app = TestApp::new();
    let json = app.load_image(&server.url_for("/red-blue.png")).await;
    let id = json["image_id"].as_str().unwrap().to_string();
    (app, id)
}

// ============================================================================
// Awaiting click
// ============================================================================

#[tokio::test]
async fn test_pick_without_click_awaits() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let body = serde_json::json!({ "image_id": id }).to_string();
    let response = app.post_json("/api/pick", &body).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "awaiting_click");
    assert_eq!(
        json["message"],
        "Click anywhere on the photo to analyze its color"
    );
    assert!(json.get("matches").is_none());
}

#[tokio::test]
async fn test_pick_with_null_coordinates_awaits() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let body = serde_json::json!({ "image_id": id, "x": null, "y": null }).to_string();
    let response = app.post_json("/api/pick", &body).await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "awaiting_click");
}

// ============================================================================
// Matching
// ============================================================================

#[tokio::test]
async fn test_pick_red_half() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let response = app.pick(&id, 100.0, 200.0).await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], "matched");
    assert_eq!(json["image_id"], id.as_str());
    assert_eq!(json["selected"]["hex"], "#ff0000");
    assert_eq!(
        json["selected"]["rgb"],
        serde_json::json!({ "r": 255, "g": 0, "b": 0 })
    );
    assert_eq!(
        json["selected"]["source"],
        serde_json::json!({ "x": 200, "y": 400 })
    );

    let l = json["selected"]["lab"]["l"].as_f64().unwrap();
    assert!((l - 53.2406).abs() < 1e-3, "L* was {l}");

    let names = assert_matches(&json, 5);
    assert_eq!(names, expected::RED_TOP5);
}

#[tokio::test]
async fn test_pick_blue_half() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let response = app.pick(&id, 700.0, 10.5).await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["selected"]["hex"], "#0000ff");
    assert_eq!(
        json["selected"]["source"],
        serde_json::json!({ "x": 1400, "y": 21 })
    );

    let names = assert_matches(&json, 5);
    assert_eq!(names, expected::BLUE_TOP5);
}

#[tokio::test]
async fn test_pick_boundary_between_halves() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    // Display x 399.5 -> source 799 (last red column)
    let json: serde_json::Value = app.pick(&id, 399.5, 0.0).await.json();
    assert_eq!(json["selected"]["hex"], "#ff0000");

    // Display x 400 -> source 800 (first blue column)
    let json: serde_json::Value = app.pick(&id, 400.0, 0.0).await.json();
    assert_eq!(json["selected"]["hex"], "#0000ff");
}

#[tokio::test]
async fn test_pick_far_corner_is_clamped() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let json: serde_json::Value = app.pick(&id, 800.0, 450.0).await.json();
    assert_eq!(
        json["selected"]["source"],
        serde_json::json!({ "x": 1599, "y": 899 })
    );
}

#[tokio::test]
async fn test_pick_repeated_click_is_deterministic() {
    let server = MockHttpServer::start().await;
    server
        .mock_png(
            "/process-blue.png",
            png_bytes(&solid_image(32, 32, [0, 160, 220])),
        )
        .await;
    let app = TestApp::new();
    let json = app.load_image(&server.url_for("/process-blue.png")).await;
    let id = json["image_id"].as_str().unwrap();

    let first = app.pick(id, 5.0, 5.0).await.text();
    let second = app.pick(id, 5.0, 5.0).await.text();
    assert_eq!(first, second);

    let json: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(assert_matches(&json, 5), expected::PROCESS_BLUE_TOP5);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_pick_outside_preview_is_bad_request() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    for (x, y) in [(-1.0, 10.0), (10.0, -0.1), (800.5, 10.0), (10.0, 451.0)] {
        let response = app.pick(&id, x, y).await;
        assert_api_error(&response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_pick_single_coordinate_is_bad_request() {
    let server = MockHttpServer::start().await;
    let (app, id) = loaded_red_blue(&server).await;

    let body = serde_json::json!({ "image_id": id, "x": 10.0 }).to_string();
    let response = app.post_json("/api/pick", &body).await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pick_unknown_image_is_not_found() {
    let app = TestApp::new();

    let response = app.pick("ffffffffffffffffffffffffffffffff", 1.0, 1.0).await;
    assert_api_error(&response, StatusCode::NOT_FOUND);

    // Unknown image is an error even without a click
    let body = serde_json::json!({ "image_id": "nope" }).to_string();
    let response = app.post_json("/api/pick", &body).await;
    assert_api_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pick_missing_image_id_is_bad_request() {
    let app = TestApp::new();
    let response = app.post_json("/api/pick", "{\"x\": 1, \"y\": 2}").await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}
