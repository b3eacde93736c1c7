//! Per-client rate limiting for the proxy and playlist routes.
//!
//! Fixed-window counters keyed by client IP. The proxy route in
//! particular fans requests out to arbitrary third-party hosts, so a
//! ceiling per caller keeps one client from turning this service into a
//! fetch cannon.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use super::state::AppState;

#[derive(Clone, Debug)]
struct Window {
    hits: u32,
    opened_at: Instant,
}

/// Fixed-window request limiter keyed by client identifier.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    /// Limiter allowing `requests_per_minute` hits per client per minute.
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self::with_window(requests_per_minute, Duration::from_secs(60))
    }

    fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            limit,
            window,
        }
    }

    /// Record a hit for `client` and report whether it is still allowed.
    pub fn allow(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            hits: 0,
            opened_at: now,
        });

        if entry.opened_at.elapsed() >= self.window {
            entry.hits = 0;
            entry.opened_at = now;
        }

        entry.hits += 1;
        entry.hits <= self.limit
    }

    /// Drop windows that have expired. Call periodically to bound memory.
    pub fn evict_stale(&self) {
        self.windows
            .retain(|_, w| w.opened_at.elapsed() < self.window);
    }
}

/// Client identity for limiting: first hop of X-Forwarded-For, or a
/// shared bucket when the service is not behind a proxy.
fn client_key(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Axum middleware: reject clients that exceed the configured limit.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(ref limiter) = state.rate_limiter {
        let client = client_key(&req);
        if !limiter.allow(&client) {
            warn!("Rate limit exceeded for client: {}", client);
            return (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded\n").into_response();
        }
    }

    next.run(req).await
}
