//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use markerpick::models::AppConfig;
use markerpick::server::{build_router, create_app_state, AppState};
use markerpick::services::ColorPicker;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub picker: Arc<ColorPicker>,
}

impl TestApp {
    /// Create a new test application using the embedded config and catalog
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config).expect("Failed to create app state");
        let picker = state.picker.clone();
        let router = build_router(state);

        Self { router, picker }
    }

    /// Create a test app state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(AppConfig::default()).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Load an image through the API and return the response JSON
    pub async fn load_image(&self, url: &str) -> serde_json::Value {
        let body = serde_json::json!({ "url": url }).to_string();
        let response = self.post_json("/api/images", &body).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Loading {url} failed: {}",
            response.text()
        );
        response.json()
    }

    /// Pick a point of a loaded image (display coordinates)
    pub async fn pick(&self, image_id: &str, x: f64, y: f64) -> TestResponse {
        let body = serde_json::json!({ "image_id": image_id, "x": x, "y": y }).to_string();
        self.post_json("/api/pick", &body).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
