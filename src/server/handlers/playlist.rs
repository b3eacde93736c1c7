use crate::{
    error::{Result, StreamgateError},
    metrics,
    playlist::{parse_channel_list, source},
    server::{net_guard, state::AppState},
};
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct PlaylistParams {
    /// Playlist source: a name inside the playlist directory, or an
    /// http(s) URL
    src: Option<String>,
}

/// Parse a channel-list source into its JSON entry array.
///
/// Success is a pretty-printed JSON array (non-ASCII left unescaped);
/// failure is the `{"error": …}` object on the same channel. Remote
/// sources are cached briefly to absorb page-load bursts.
pub async fn serve_playlist(
    Query(params): Query<PlaylistParams>,
    State(state): State<AppState>,
) -> Result<Response> {
    let start = Instant::now();

    let src = params
        .src
        .ok_or_else(|| StreamgateError::InvalidTarget("missing src parameter".to_string()))?;

    info!("Serving playlist for source: {}", src);

    let text = fetch_source_text(&src, &state).await?;
    let entries = parse_channel_list(&text);

    info!("Playlist {} produced {} entries", src, entries.len());

    let body = serde_json::to_string_pretty(&entries)
        .map_err(|e| StreamgateError::Internal(format!("entry serialization failed: {e}")))?;

    metrics::record_request("playlist", 200);
    metrics::record_duration("playlist", start);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Raw playlist text for `src`, via the TTL cache for remote sources.
async fn fetch_source_text(src: &str, state: &AppState) -> Result<String> {
    let remote = src.starts_with("http://") || src.starts_with("https://");

    if remote {
        // Dev instances may point at local fixtures; production never
        // fetches non-public hosts.
        if !state.config.is_dev {
            net_guard::ensure_public_http_url(src)?;
        }
        if let Some(cached) = state.playlist_cache.get(src) {
            return Ok(cached);
        }
    }

    let text = source::load(src, &state.http_client, &state.config.playlist_dir)
        .await
        .inspect_err(|_| metrics::record_source_error())?;

    if remote {
        state.playlist_cache.insert(src, text.clone());
    }

    Ok(text)
}
