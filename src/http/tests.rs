//! Tests for the HTTP client module

use super::*;
use crate::error::{Error, ErrorKind};
use crate::pagination::PageSource;
use crate::types::Page;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(base).build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert_eq!(config.locator_policy, LocatorPolicy::Rebase);
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert!(config.user_agent.starts_with("bookclub-hub/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(5))
        .rate_limit(RateLimiterConfig::per_second(2))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .locator_policy(LocatorPolicy::Follow)
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 1)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.locator_policy, LocatorPolicy::Follow);

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());
}

#[test]
fn test_invalid_base_url() {
    let config = HttpClientConfig::builder().base_url("not a url").build();
    let err = HttpClient::with_config(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    let config = HttpClientConfig::builder().base_url("ftp://files.example.com").build();
    let err = HttpClient::with_config(config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

// ============================================================================
// Locator resolution
// ============================================================================

#[test]
fn test_resolve_relative_locator() {
    let client = client_for("https://api.example.com/");
    assert_eq!(
        client.resolve("/bookclub/").unwrap().as_str(),
        "https://api.example.com/bookclub/"
    );
    assert_eq!(
        client.resolve("bookclub/?page=2").unwrap().as_str(),
        "https://api.example.com/bookclub/?page=2"
    );
}

#[test]
fn test_resolve_keeps_base_path_prefix() {
    let client = client_for("https://example.com/api");
    assert_eq!(
        client.resolve("/bookclub/").unwrap().as_str(),
        "https://example.com/api/bookclub/"
    );
}

#[test]
fn test_resolve_absolute_and_relative_agree_under_base_prefix() {
    let client = client_for("https://example.com/api");

    let relative = client.resolve("/bookclub/?page=2").unwrap();
    let absolute = client
        .resolve("https://public.example.com/bookclub/?page=2")
        .unwrap();

    assert_eq!(relative.as_str(), "https://example.com/api/bookclub/?page=2");
    assert_eq!(absolute, relative);
}

#[test]
fn test_resolve_rebases_absolute_locator() {
    let client = client_for("https://api.example.com");
    let url = client
        .resolve("http://internal:8000/bookclub/?limit=10&offset=10")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/bookclub/?limit=10&offset=10"
    );
}

#[test]
fn test_resolve_follow_policy_keeps_absolute_locator() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .locator_policy(LocatorPolicy::Follow)
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let url = client.resolve("http://other.example.com/bookclub/?page=3").unwrap();
    assert_eq!(url.as_str(), "http://other.example.com/bookclub/?page=3");
}

#[test]
fn test_resolve_relative_without_base() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let err = client.resolve("/bookclub/").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));

    let url = client.resolve("https://api.example.com/bookclub/").unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/bookclub/");
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let data: serde_json::Value = client.get_json("/api/data").await.unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookclub/search/"))
        .and(query_param("q", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let data: Vec<serde_json::Value> = client
        .get_json_with_query("/bookclub/search/", &[("q".to_string(), "dune".to_string())])
        .await
        .unwrap();

    assert!(data.is_empty());
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client
        .get_json::<serde_json::Value>("/api/flaky")
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client
        .get_json::<serde_json::Value>("/bookclub/")
        .await
        .unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookclub/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err = client
        .get_json::<Page<serde_json::Value>>("/bookclub/")
        .await
        .unwrap_err();

    match err {
        Error::Decode { url, .. } => assert!(url.ends_with("/bookclub/")),
        other => panic!("Expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_json::<serde_json::Value>("/slow")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on the discard port
    let client = client_for("http://127.0.0.1:9");
    let err = client
        .get_json::<serde_json::Value>("/bookclub/")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_page_source_impl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookclub/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": ["x"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let url = client.resolve_locator("/bookclub/").unwrap();
    let page: Page<String> = client.fetch_page(&url).await.unwrap();

    assert_eq!(page.results, vec!["x".to_string()]);
    assert!(page.is_last());
}
