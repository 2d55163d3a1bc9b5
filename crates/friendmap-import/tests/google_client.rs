//! Integration tests for `GoogleGeocodingClient` using wiremock HTTP mocks.

use friendmap_import::{GeocodeError, GoogleGeocodingClient};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleGeocodingClient {
    GoogleGeocodingClient::with_base_url("test-key", 5, "friendmap-test", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn ok_status_returns_first_candidate() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "123 Main St, Springfield, IL 62704, USA",
                "geometry": { "location": { "lat": 39.7817, "lng": -89.6501 } }
            },
            {
                "formatted_address": "123 Main St, Springfield, MO, USA",
                "geometry": { "location": { "lat": 37.2090, "lng": -93.2923 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(query_param("address", "123 Main St, Springfield, IL 62704"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coords = client
        .geocode_address("123 Main St, Springfield, IL 62704")
        .await
        .expect("should parse response")
        .expect("should find a match");

    assert!((coords.lat - 39.7817).abs() < 1e-9);
    assert!((coords.lng - -89.6501).abs() < 1e-9);
}

#[tokio::test]
async fn zero_results_returns_none() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });

    Mock::given(method("GET"))
        .and(query_param("address", "Nowhere, ZZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let coords = client
        .geocode_address("Nowhere, ZZ")
        .await
        .expect("ZERO_RESULTS is not an error");

    assert!(coords.is_none());
}

#[tokio::test]
async fn request_denied_returns_provider_status_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid.",
        "results": []
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode_address("Boston, MA").await.unwrap_err();

    assert!(matches!(
        &err,
        GeocodeError::ProviderStatus { status, .. } if status == "REQUEST_DENIED"
    ));
    let msg = err.to_string();
    assert!(
        msg.contains("The provided API key is invalid."),
        "expected provider message in error, got: {msg}"
    );
}

#[tokio::test]
async fn server_error_returns_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode_address("Boston, MA").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Http(_)), "got: {err}");
    let msg = err.to_string();
    assert!(!msg.contains("test-key"), "API key leaked into error: {msg}");
    assert!(!msg.contains("Boston"), "address leaked into error: {msg}");
}

#[tokio::test]
async fn malformed_body_returns_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode_address("Boston, MA").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Deserialize { .. }), "got: {err}");
}
