// Request handlers for the console API

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::docs::{framework_docs, DEFAULT_DOCS_VERSION};
use crate::services::{default_services, get_services};
use crate::wizard::Platform;

/// GET /metrics: Prometheus text exposition
pub(super) async fn metrics_exposition(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.metrics.content_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, "failed to render metrics exposition");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/server_config.js: cluster configuration for the frontend
///
/// Production trusts the forwarded-auth headers set by the auth proxy;
/// non-production embeds the developer identity from configuration.
pub(super) async fn server_config_script(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let config = &state.config;

    let (token, name, email) = if config.is_production() {
        (
            header_value(&headers, "X-Forwarded-Access-Token"),
            header_value(&headers, "X-Forwarded-User"),
            header_value(&headers, "X-Forwarded-Email"),
        )
    } else {
        (
            config.user_token.clone().unwrap_or_default(),
            config.user_name.clone(),
            config.user_email.clone(),
        )
    };

    let script = format!(
        "window.OPENSHIFT_CONFIG = {{\n\
         \x20 mdcNamespace: '{namespace}',\n\
         \x20 masterUri: 'https://{host}',\n\
         \x20 wssMasterUri: 'wss://{host}',\n\
         \x20 user: {{\n\
         \x20   accessToken: '{token}',\n\
         \x20   name: '{name}',\n\
         \x20   email: '{email}'\n\
         \x20 }}\n\
         }};",
        namespace = config.mdc_namespace,
        host = config.openshift_host,
    );

    ([(header::CONTENT_TYPE, "application/javascript")], script)
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// GET /api/mobileservices: the service directory
pub(super) async fn mobile_services(State(state): State<AppState>) -> Json<Value> {
    let defaults = default_services(&state.config);
    let items = get_services(&state.config.services_config_file, &defaults).await;
    Json(json!({ "items": items }))
}

#[derive(Deserialize)]
pub(super) struct DocsQuery {
    #[serde(rename = "docsVersion")]
    docs_version: Option<String>,
}

/// GET /api/sdk_docs/{platform}: SDK setup instructions
pub(super) async fn sdk_docs(
    Path(platform): Path<String>,
    Query(query): Query<DocsQuery>,
) -> impl IntoResponse {
    match platform.parse::<Platform>() {
        Ok(platform) => {
            let version = query
                .docs_version
                .as_deref()
                .unwrap_or(DEFAULT_DOCS_VERSION);
            Json(framework_docs(platform, version)).into_response()
        }
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown platform {platform}") })),
        )
            .into_response(),
    }
}

/// GET /about: version from package metadata
pub(super) async fn about() -> Json<Value> {
    Json(json!({
        "version": option_env!("CARGO_PKG_VERSION").unwrap_or("Not Available")
    }))
}
