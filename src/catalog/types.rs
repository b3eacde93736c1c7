use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Transcoded video reference as the catalog API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    pub transcode_uuid: String,
    #[serde(default)]
    pub cdn_hostname: Option<String>,
    /// Opaque subtitle descriptor, passed through to clients as-is
    #[serde(default)]
    pub subtitle_metadata: Option<Value>,
}

/// A movie record from the catalog API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title_th: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub video: Option<VideoSource>,
}

/// One episode of a series as the catalog API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub season_no: u32,
    pub episode_no: u32,
    #[serde(default)]
    pub title_th: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub video: Option<VideoSource>,
}

/// A series record from the catalog API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: i64,
    #[serde(default)]
    pub title_th: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A movie resolved into something a player can load directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayableMovie {
    pub id: i64,
    pub title: String,
    /// HLS playlist URL built from the transcode UUID
    pub video: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_metadata: Option<Value>,
}

/// One playable episode inside a resolved series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayableEpisode {
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub video: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_metadata: Option<Value>,
}

/// Episodes of one season, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonGroup {
    pub season: u32,
    pub episodes: Vec<PlayableEpisode>,
}

/// A series resolved into season-grouped playable episodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedShow {
    pub id: i64,
    pub title: String,
    pub seasons: Vec<SeasonGroup>,
}

/// Build the HLS playlist URL for a transcode UUID.
pub fn playlist_url(media_base: &str, transcode_uuid: &str) -> String {
    format!("{media_base}/video/{transcode_uuid}/playlist.m3u8")
}

/// First non-empty title wins. Empty strings from the API count as absent.
fn pick_title(primary: &Option<String>, secondary: &Option<String>) -> Option<String> {
    [primary, secondary]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .cloned()
}

impl Movie {
    /// Resolve into a playable item, or `None` when the catalog record
    /// carries no transcoded video.
    pub fn resolve(self, media_base: &str) -> Option<PlayableMovie> {
        let video = self.video?;
        let title = pick_title(&self.title_th, &self.title_en).unwrap_or_default();

        Some(PlayableMovie {
            id: self.id,
            title,
            video: playlist_url(media_base, &video.transcode_uuid),
            cdn_hostname: video.cdn_hostname,
            subtitle_metadata: video.subtitle_metadata,
        })
    }
}

impl Episode {
    fn resolve(self, media_base: &str) -> Option<PlayableEpisode> {
        let video = self.video?;
        let title = pick_title(&self.title_th, &self.title_en)
            .unwrap_or_else(|| format!("EP{}", self.episode_no));

        Some(PlayableEpisode {
            season: self.season_no,
            episode: self.episode_no,
            title,
            video: playlist_url(media_base, &video.transcode_uuid),
            cdn_hostname: video.cdn_hostname,
            subtitle_metadata: video.subtitle_metadata,
        })
    }
}

impl Show {
    /// Resolve into season-grouped playable episodes. Seasons come out in
    /// ascending order; episode order within a season is preserved from
    /// the catalog. Episodes without a transcoded video are skipped.
    pub fn resolve(self, media_base: &str) -> ResolvedShow {
        let title = pick_title(&self.title_th, &self.title_en).unwrap_or_default();

        let mut by_season: BTreeMap<u32, Vec<PlayableEpisode>> = BTreeMap::new();
        for episode in self.episodes {
            if let Some(playable) = episode.resolve(media_base) {
                by_season.entry(playable.season).or_default().push(playable);
            }
        }

        ResolvedShow {
            id: self.id,
            title,
            seasons: by_season
                .into_iter()
                .map(|(season, episodes)| SeasonGroup { season, episodes })
                .collect(),
        }
    }
}
