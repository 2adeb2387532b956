// Integration tests for the console HTTP API

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use tower::ServiceExt;

use mdc_console::config::Config;
use mdc_console::server::ConsoleServer;

fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        (
            "OPENSHIFT_HOST".to_string(),
            "cluster.example.com".to_string(),
        ),
        ("OPENSHIFT_USER_TOKEN".to_string(), "abc".to_string()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

fn test_router(config: Config) -> Router {
    ConsoleServer::new(config).unwrap().router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: Router, uri: &str) -> Value {
    let (status, body) = get(router, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {uri}: {body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_about_returns_crate_version() {
    let body = get_json(test_router(test_config(&[])), "/about").await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_server_config_embeds_developer_identity() {
    let (status, body) = get(
        test_router(test_config(&[])),
        "/api/server_config.js",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("accessToken: 'abc'"), "{body}");
    assert!(body.contains("name: 'testuser'"), "{body}");
    assert!(body.contains("email: 'testuser@localhost'"), "{body}");
    assert!(body.contains("masterUri: 'https://cluster.example.com'"));
    assert!(body.contains("wssMasterUri: 'wss://cluster.example.com'"));
    assert!(body.contains("mdcNamespace: 'myproject'"));
}

#[tokio::test]
async fn test_server_config_production_reads_forwarded_headers() {
    let router = test_router(test_config(&[("MDC_ENV", "production")]));

    let response = router
        .oneshot(
            Request::get("/api/server_config.js")
                .header("X-Forwarded-Access-Token", "proxy-token")
                .header("X-Forwarded-User", "alice")
                .header("X-Forwarded-Email", "alice@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("accessToken: 'proxy-token'"), "{body}");
    assert!(body.contains("name: 'alice'"), "{body}");
    assert!(body.contains("email: 'alice@example.com'"), "{body}");
}

#[tokio::test]
async fn test_mobileservices_defaults_when_config_file_missing() {
    let config = test_config(&[(
        "MOBILE_SERVICES_CONFIG_FILE",
        "/nonexistent/servicesConfig.json",
    )]);

    let body = get_json(test_router(config), "/api/mobileservices").await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    let types: Vec<&str> = items
        .iter()
        .map(|item| item["type"].as_str().unwrap())
        .collect();
    assert!(types.contains(&"identity-management"));
    assert!(types.contains(&"push"));
    assert!(types.contains(&"metrics"));

    let push = items.iter().find(|item| item["type"] == "push").unwrap();
    assert_eq!(push["name"], "Push Notifications");
    assert_eq!(push["icon"], "/img/push.png");
    assert_eq!(push["url"], "https://cluster.example.com");
}

#[tokio::test]
async fn test_mobileservices_reads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"services": [
            {{"type": "push", "url": "https://push.example.com"}},
            {{"type": "fax-gateway", "url": "https://fax.example.com"}}
        ]}}"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config = test_config(&[("MOBILE_SERVICES_CONFIG_FILE", path.as_str())]);

    let body = get_json(test_router(config), "/api/mobileservices").await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    // Known type gets display metadata merged in, descriptor fields winning
    assert_eq!(items[0]["name"], "Push Notifications");
    assert_eq!(items[0]["url"], "https://push.example.com");

    // Unknown type passes through unchanged
    assert_eq!(
        items[1],
        serde_json::json!({"type": "fax-gateway", "url": "https://fax.example.com"})
    );
}

#[tokio::test]
async fn test_sdk_docs_known_platform() {
    let body = get_json(test_router(test_config(&[])), "/api/sdk_docs/cordova").await;
    assert_eq!(body["title"], "Cordova");
    assert!(body["services"]["push"]["docsLink"]
        .as_str()
        .unwrap()
        .contains("/latest/"));
}

#[tokio::test]
async fn test_sdk_docs_respects_version_query() {
    let body = get_json(
        test_router(test_config(&[])),
        "/api/sdk_docs/android?docsVersion=1.2",
    )
    .await;
    assert!(body["services"]["metrics"]["docsLink"]
        .as_str()
        .unwrap()
        .contains("/1.2/"));
}

#[tokio::test]
async fn test_sdk_docs_unknown_platform_is_404() {
    let (status, _) = get(test_router(test_config(&[])), "/api/sdk_docs/blackberry").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_exposition_tracks_requests() {
    let router = test_router(test_config(&[]));

    // Serve one request so the histogram has an observation
    let (status, _) = get(router.clone(), "/about").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("http_request_duration_seconds"), "{body}");
    assert!(body.contains("path=\"/about\""), "{body}");
}
