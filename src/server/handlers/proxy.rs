use crate::{
    error::Result,
    metrics,
    server::{net_guard, state::AppState},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Fallback content type when the upstream does not declare one.
const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Fetch a third-party resource on behalf of a browser client.
///
/// Upstream pages block cross-origin reads; this endpoint performs the
/// fetch server-side with a browser User-Agent (and optional Referer) and
/// returns the body with `Access-Control-Allow-Origin: *`. Upstream error
/// statuses pass through with the JSON error object as body.
pub async fn serve_proxy(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Response> {
    let start = Instant::now();

    let Some(target) = params.get("url") else {
        metrics::record_request("proxy", 400);
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing url parameter" })),
        )
            .into_response());
    };

    // Dev instances may proxy local fixtures; production never fetches
    // non-public hosts.
    if !state.config.is_dev {
        net_guard::ensure_public_http_url(target)?;
    }

    info!("Proxying fetch for: {}", target);

    let mut request = state
        .http_client
        .get(target)
        .header(header::USER_AGENT, &state.config.proxy_user_agent);
    if let Some(referer) = &state.config.proxy_referer {
        request = request.header(header::REFERER, referer);
    }

    let response = request.send().await?;

    if !response.status().is_success() {
        metrics::record_source_error();
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        metrics::record_request("proxy", status.as_u16());
        metrics::record_duration("proxy", start);

        return Ok((status, Json(json!({ "error": "Failed to fetch target" }))).into_response());
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let body = response.text().await?;

    info!("Proxied {} bytes from {}", body.len(), target);

    metrics::record_request("proxy", 200);
    metrics::record_duration("proxy", start);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.as_str()),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response())
}
