// Metrics module
// Prometheus registry, HTTP request timing, and text exposition

mod http;

pub use http::{track_requests, HttpMetrics, REQUEST_DURATION_BUCKETS};
