use crate::{
    error::{Result, StreamgateError},
    server::state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Liveness report with version and uptime.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

/// Render accumulated metrics in Prometheus exposition format.
pub async fn serve_metrics(State(state): State<AppState>) -> Result<Response> {
    let handle = state.metrics_handle.as_ref().ok_or_else(|| {
        StreamgateError::Internal("metrics recorder not installed in this process".to_string())
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}
