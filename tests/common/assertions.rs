//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response: HTTP status plus `{"status", "error"}` body
pub fn assert_api_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a matched pick/match response and return the marker names in rank order
pub fn assert_matches(json: &serde_json::Value, expected_len: usize) -> Vec<String> {
    let matches = json["matches"]
        .as_array()
        .unwrap_or_else(|| panic!("Expected matches array in {json}"));
    assert_eq!(matches.len(), expected_len, "Unexpected number of matches");

    let distances: Vec<f64> = matches
        .iter()
        .map(|m| m["distance"].as_f64().expect("distance"))
        .collect();
    assert!(
        distances.windows(2).all(|w| w[0] <= w[1]),
        "Matches not sorted by distance: {distances:?}"
    );

    for (i, m) in matches.iter().enumerate() {
        assert_eq!(m["rank"].as_u64(), Some(i as u64 + 1));
        assert!(m["hex"].as_str().is_some_and(|h| h.starts_with('#')));
    }

    matches
        .iter()
        .map(|m| m["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
