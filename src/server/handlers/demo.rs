use axum::{
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::fmt::Write;
use tracing::info;

/// Base URL for Mux Big Buck Bunny test streams
const DEMO_STREAM: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";
/// Rotating category labels for generated entries
const DEMO_GROUPS: [&str; 3] = ["Movies", "Series", "News"];
/// Referrer stamped on the first generated entry
const DEMO_REFERRER: &str = "https://demo.streamgate.dev/";

/// Query parameters for the demo channel list
#[derive(Debug, Deserialize)]
pub struct DemoParams {
    /// Number of channels (1-20, default: 4)
    channels: Option<u8>,
}

impl DemoParams {
    /// Validated channel count, clamped to 1..=20
    fn channel_count(&self) -> u8 {
        self.channels.unwrap_or(4).clamp(1, 20)
    }
}

/// Build a synthetic channel list in the EXTM3U channel-list dialect.
///
/// Entries rotate through the demo groups; the first entry carries a
/// Referer option line so downstream parsing of option directives can be
/// exercised end to end.
fn build_demo_channels(count: u8) -> String {
    let mut playlist = String::with_capacity(1024);

    let _ = writeln!(playlist, "#EXTM3U");

    for i in 0..count as u32 {
        let group = DEMO_GROUPS[(i as usize) % DEMO_GROUPS.len()];
        let _ = writeln!(
            playlist,
            "#EXTINF:-1 tvg-logo=\"https://demo.streamgate.dev/logos/{}.png\" group-title=\"{}\",Demo Channel {}",
            i + 1,
            group,
            i + 1
        );
        if i == 0 {
            let _ = writeln!(playlist, "#EXTVLCOPT:http-referrer={}", DEMO_REFERRER);
        }
        let _ = writeln!(playlist, "{}", DEMO_STREAM);
    }

    playlist
}

/// Demo channel-list endpoint
///
/// Serves a synthetic channel list so the playlist route has a local
/// origin to parse in development and end-to-end tests.
///
/// # Query Parameters
/// * `channels` — Number of entries, 1-20 (default: 4)
pub async fn serve_demo_channels(Query(params): Query<DemoParams>) -> Response {
    let count = params.channel_count();

    info!("Serving demo channel list: {} channels", count);

    let playlist = build_demo_channels(count);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/x-mpegurl")],
        playlist,
    )
        .into_response()
}
