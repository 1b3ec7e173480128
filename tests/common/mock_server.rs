//! Mock HTTP server serving test images and catalogs.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockHttpServer {
    pub server: MockServer,
}

impl MockHttpServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mock a GET endpoint returning binary content
    pub async fn mock_get_bytes(&self, endpoint: &str, content_type: &str, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body, content_type),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a GET endpoint returning a PNG
    pub async fn mock_png(&self, endpoint: &str, png: Vec<u8>) {
        self.mock_get_bytes(endpoint, "image/png", png).await;
    }

    /// Mock a GET endpoint returning text
    pub async fn mock_get_text(&self, endpoint: &str, content_type: &str, text: &str) {
        self.mock_get_bytes(endpoint, content_type, text.as_bytes().to_vec())
            .await;
    }

    /// Mock an endpoint that answers after a delay
    pub async fn mock_slow(&self, endpoint: &str, delay: std::time::Duration) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
