// HTTP request metrics
// Request-duration histogram observed by an axum middleware layer, plus
// process metrics and the Prometheus text exposition

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use std::time::Instant;

/// Request-duration histogram buckets, in seconds.
pub const REQUEST_DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 1.5];

/// Shared metrics state; clones share the underlying registry.
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    request_duration: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(REQUEST_DURATION_BUCKETS.to_vec()),
            &["method", "path", "status"],
        )
        .context("Failed to build request duration histogram")?;

        registry
            .register(Box::new(request_duration.clone()))
            .context("Failed to register request duration histogram")?;

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .context("Failed to register process collector")?;

        Ok(Self {
            registry,
            request_duration,
        })
    }

    pub fn observe(&self, method: &str, path: &str, status: u16, seconds: f64) {
        self.request_duration
            .with_label_values(&[method, path, &status.to_string()])
            .observe(seconds);
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics exposition was not valid UTF-8")
    }

    pub fn content_type(&self) -> &'static str {
        "text/plain; version=0.0.4"
    }
}

/// Axum middleware that times every request into the duration histogram.
pub async fn track_requests(
    State(metrics): State<HttpMetrics>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.observe(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
