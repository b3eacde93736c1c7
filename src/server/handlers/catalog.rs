use crate::{
    error::{Result, StreamgateError},
    metrics,
    server::state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::info;

/// Resolve a movie into a playable item: title, HLS playlist URL, CDN
/// hostname and subtitle metadata.
pub async fn serve_movie(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response> {
    let start = Instant::now();
    info!("Resolving movie: {}", id);

    let movie = state
        .catalog
        .movie_by_id(id)
        .await?
        .ok_or_else(|| StreamgateError::CatalogNotFound(format!("movie {id}")))?;

    let playable = movie.resolve(&state.config.media_base_url).ok_or_else(|| {
        StreamgateError::CatalogDecode(format!("movie {id} has no transcoded video"))
    })?;

    metrics::record_request("catalog_movie", 200);
    metrics::record_duration("catalog_movie", start);

    Ok(Json(playable).into_response())
}

/// Resolve a series into season-grouped playable episodes.
pub async fn serve_series(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response> {
    let start = Instant::now();
    info!("Resolving series: {}", id);

    let show = state
        .catalog
        .show_by_id(id)
        .await?
        .ok_or_else(|| StreamgateError::CatalogNotFound(format!("series {id}")))?;

    let resolved = show.resolve(&state.config.media_base_url);

    metrics::record_request("catalog_series", 200);
    metrics::record_duration("catalog_series", start);

    Ok(Json(resolved).into_response())
}
