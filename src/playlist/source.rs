use crate::error::{Result, StreamgateError};
use reqwest::Client;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Obtain raw playlist text from a path or an http(s) URL.
///
/// A single attempt either way: the text is returned or the source is
/// reported unavailable. No retry, no partial results.
///
/// File sources resolve strictly inside `playlist_dir`; URL callers are
/// expected to have passed the target through the SSRF guard already.
pub async fn load(src: &str, client: &Client, playlist_dir: &str) -> Result<String> {
    if src.starts_with("http://") || src.starts_with("https://") {
        load_url(src, client).await
    } else {
        load_file(src, playlist_dir).await
    }
}

async fn load_url(url: &str, client: &Client) -> Result<String> {
    info!("Fetching playlist source: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| StreamgateError::SourceUnavailable(format!("{url}: {e}")))?;

    if !response.status().is_success() {
        return Err(StreamgateError::SourceUnavailable(format!(
            "{url}: status {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| StreamgateError::SourceUnavailable(format!("{url}: {e}")))
}

async fn load_file(src: &str, playlist_dir: &str) -> Result<String> {
    let path = resolve_in_dir(src, playlist_dir)?;
    info!("Reading playlist source: {}", path.display());

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| StreamgateError::SourceUnavailable(format!("no such playlist: {src}")))
}

/// Resolve a relative source name inside the playlist directory.
///
/// Absolute paths and any `..` component are rejected so a query parameter
/// can never escape the configured directory.
fn resolve_in_dir(src: &str, playlist_dir: &str) -> Result<PathBuf> {
    let requested = Path::new(src);

    if requested.is_absolute() {
        return Err(StreamgateError::InvalidTarget(format!(
            "absolute playlist paths not allowed: {src}"
        )));
    }
    if requested
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(StreamgateError::InvalidTarget(format!(
            "path traversal not allowed: {src}"
        )));
    }

    Ok(Path::new(playlist_dir).join(requested))
}
