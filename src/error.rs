use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StreamgateError>;

/// All failure modes surfaced at the HTTP boundary.
///
/// Every variant renders as the single JSON error channel
/// `{"error": "<message>"}` so clients distinguish success (array/object
/// payload) from failure by shape alone.
#[derive(Debug, Error)]
pub enum StreamgateError {
    /// The raw playlist text could not be obtained (missing file,
    /// unreadable path, non-2xx source response).
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// A user-supplied URL or path was rejected before any fetch.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// An upstream HTTP request failed at the network level.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(#[from] reqwest::Error),

    /// The catalog API answered but the requested item does not exist.
    #[error("not found in catalog: {0}")]
    CatalogNotFound(String),

    /// The catalog API answered with a payload we could not interpret.
    #[error("catalog response malformed: {0}")]
    CatalogDecode(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl StreamgateError {
    fn status_code(&self) -> StatusCode {
        match self {
            StreamgateError::SourceUnavailable(_) => StatusCode::NOT_FOUND,
            StreamgateError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            StreamgateError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
            StreamgateError::CatalogNotFound(_) => StatusCode::NOT_FOUND,
            StreamgateError::CatalogDecode(_) => StatusCode::BAD_GATEWAY,
            StreamgateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StreamgateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!("Request failed ({}): {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
