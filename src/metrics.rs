//! Request counters and latency histograms, exported in Prometheus format
//! by the `/metrics` route.

use metrics::{counter, histogram};
use std::time::Instant;

/// Count a handled request by endpoint and response status.
pub fn record_request(endpoint: &'static str, status: u16) {
    counter!(
        "streamgate_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record handler latency for an endpoint.
pub fn record_duration(endpoint: &'static str, start: Instant) {
    histogram!("streamgate_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Count a failed upstream/source fetch.
pub fn record_source_error() {
    counter!("streamgate_source_errors_total").increment(1);
}
