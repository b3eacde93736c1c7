//! Playback-surface abstraction.
//!
//! The actual player (an HLS engine attached to a `<video>` element, a TV
//! shell, a test double) lives outside this crate. Whatever the target
//! environment provides implements [`PlayerSurface`]; this module owns the
//! logic that turns media metadata into the selector options the surface
//! displays.

use serde_json::Value;

use crate::catalog::types::playlist_url;

/// Selector index that means "let the engine pick" for quality levels.
pub const AUTO_LEVEL: i32 = -1;

/// A labelled option in one of the surface's selectors. `value` is the
/// index the engine expects back when the option is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOption {
    pub value: i32,
    pub label: String,
}

/// An audio rendition as the playback engine reports it.
#[derive(Debug, Clone, Default)]
pub struct AudioTrack {
    pub name: Option<String>,
    pub lang: Option<String>,
}

/// A quality level as the playback engine reports it.
#[derive(Debug, Clone, Default)]
pub struct QualityLevel {
    /// Vertical resolution, when the manifest declares one
    pub height: Option<u32>,
    /// Bits per second
    pub bitrate: u32,
}

/// A subtitle rendition with a resolved cue-file URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    pub lang: String,
    pub label: String,
    pub url: String,
}

/// Operations the hosting UI must provide.
pub trait PlayerSurface {
    fn set_source(&mut self, url: &str);
    fn set_audio_tracks(&mut self, tracks: Vec<TrackOption>);
    fn set_quality_levels(&mut self, levels: Vec<TrackOption>);
    fn set_subtitle_tracks(&mut self, tracks: Vec<TrackOption>);
}

/// Label for an audio rendition: `"Name (lang)"` with placeholder
/// fallbacks for anonymous tracks.
pub fn audio_label(track: &AudioTrack) -> String {
    format!(
        "{} ({})",
        track.name.as_deref().unwrap_or("Track"),
        track.lang.as_deref().unwrap_or("und")
    )
}

/// Label for a quality level: resolution when known, else rounded kbps.
pub fn quality_label(level: &QualityLevel) -> String {
    match level.height {
        Some(height) => format!("{height}p"),
        None => format!("{}kbps", ((level.bitrate as f64) / 1000.0).round() as u32),
    }
}

/// Build audio selector options, indexed in engine order.
pub fn audio_options(tracks: &[AudioTrack]) -> Vec<TrackOption> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackOption {
            value: i as i32,
            label: audio_label(track),
        })
        .collect()
}

/// Build quality selector options: `Auto` first, then each level.
pub fn quality_options(levels: &[QualityLevel]) -> Vec<TrackOption> {
    let mut options = Vec::with_capacity(levels.len() + 1);
    options.push(TrackOption {
        value: AUTO_LEVEL,
        label: "Auto".to_string(),
    });
    options.extend(levels.iter().enumerate().map(|(i, level)| TrackOption {
        value: i as i32,
        label: quality_label(level),
    }));
    options
}

/// Build subtitle selector options, indexed in track order.
pub fn subtitle_options(tracks: &[SubtitleTrack]) -> Vec<TrackOption> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackOption {
            value: i as i32,
            label: track.label.clone(),
        })
        .collect()
}

/// Project catalog subtitle metadata into concrete tracks.
///
/// The metadata is an opaque catalog value; when it parses as a list of
/// objects with a language tag, each element becomes a track. Tracks
/// without an explicit URL get a cue file resolved next to the playlist.
pub fn subtitle_tracks_from_metadata(
    metadata: &Value,
    media_base: &str,
    transcode_uuid: &str,
) -> Vec<SubtitleTrack> {
    let Some(items) = metadata.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let lang = item
                .get("lang")
                .or_else(|| item.get("language"))
                .and_then(Value::as_str)?;
            let label = item
                .get("label")
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)
                .unwrap_or(lang);
            let url = item
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("{media_base}/video/{transcode_uuid}/subtitles/{lang}.vtt")
                });

            Some(SubtitleTrack {
                lang: lang.to_string(),
                label: label.to_string(),
                url,
            })
        })
        .collect()
}

/// Point the surface at a media URL and populate all three selectors.
pub fn wire_player(
    surface: &mut dyn PlayerSurface,
    url: &str,
    audio: &[AudioTrack],
    levels: &[QualityLevel],
    subtitles: &[SubtitleTrack],
) {
    surface.set_source(url);
    surface.set_audio_tracks(audio_options(audio));
    surface.set_quality_levels(quality_options(levels));
    surface.set_subtitle_tracks(subtitle_options(subtitles));
}

/// Convenience for catalog items: wire a transcode UUID's playlist plus
/// its subtitle metadata onto a surface.
pub fn wire_catalog_item(
    surface: &mut dyn PlayerSurface,
    media_base: &str,
    transcode_uuid: &str,
    subtitle_metadata: Option<&Value>,
) {
    let url = playlist_url(media_base, transcode_uuid);
    let subtitles = subtitle_metadata
        .map(|m| subtitle_tracks_from_metadata(m, media_base, transcode_uuid))
        .unwrap_or_default();

    wire_player(surface, &url, &[], &[], &subtitles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Records every surface call for assertions.
    #[derive(Default)]
    struct RecordingSurface {
        source: Option<String>,
        audio: Vec<TrackOption>,
        quality: Vec<TrackOption>,
        subtitles: Vec<TrackOption>,
    }

    impl PlayerSurface for RecordingSurface {
        fn set_source(&mut self, url: &str) {
            self.source = Some(url.to_string());
        }
        fn set_audio_tracks(&mut self, tracks: Vec<TrackOption>) {
            self.audio = tracks;
        }
        fn set_quality_levels(&mut self, levels: Vec<TrackOption>) {
            self.quality = levels;
        }
        fn set_subtitle_tracks(&mut self, tracks: Vec<TrackOption>) {
            self.subtitles = tracks;
        }
    }

    #[test]
    fn audio_label_uses_name_and_lang() {
        let track = AudioTrack {
            name: Some("Thai".to_string()),
            lang: Some("th".to_string()),
        };
        assert_eq!(audio_label(&track), "Thai (th)");
    }

    #[test]
    fn audio_label_falls_back_for_anonymous_tracks() {
        assert_eq!(audio_label(&AudioTrack::default()), "Track (und)");
    }

    #[test]
    fn quality_label_prefers_height() {
        let level = QualityLevel {
            height: Some(720),
            bitrate: 2_800_000,
        };
        assert_eq!(quality_label(&level), "720p");
    }

    #[test]
    fn quality_label_rounds_bitrate() {
        let level = QualityLevel {
            height: None,
            bitrate: 1_499_600,
        };
        assert_eq!(quality_label(&level), "1500kbps");
    }

    #[test]
    fn quality_options_lead_with_auto() {
        let levels = vec![
            QualityLevel {
                height: Some(480),
                bitrate: 1_000_000,
            },
            QualityLevel {
                height: Some(1080),
                bitrate: 5_000_000,
            },
        ];

        let options = quality_options(&levels);
        assert_eq!(options[0].value, AUTO_LEVEL);
        assert_eq!(options[0].label, "Auto");
        assert_eq!(options[1], TrackOption { value: 0, label: "480p".into() });
        assert_eq!(options[2], TrackOption { value: 1, label: "1080p".into() });
    }

    #[test]
    fn subtitle_tracks_from_list_metadata() {
        let metadata = json!([
            { "lang": "th", "label": "ไทย" },
            { "language": "en", "name": "English", "url": "https://cdn.x/en.vtt" }
        ]);

        let tracks = subtitle_tracks_from_metadata(&metadata, "https://m", "uuid-1");
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].label, "ไทย");
        assert_eq!(tracks[0].url, "https://m/video/uuid-1/subtitles/th.vtt");
        assert_eq!(tracks[1].url, "https://cdn.x/en.vtt");
    }

    #[test]
    fn non_list_metadata_yields_no_tracks() {
        assert!(subtitle_tracks_from_metadata(&json!({"x": 1}), "https://m", "u").is_empty());
        assert!(subtitle_tracks_from_metadata(&json!(null), "https://m", "u").is_empty());
    }

    #[test]
    fn wire_player_populates_all_selectors() {
        let mut surface = RecordingSurface::default();
        let audio = vec![AudioTrack {
            name: Some("Main".to_string()),
            lang: Some("en".to_string()),
        }];
        let levels = vec![QualityLevel {
            height: Some(720),
            bitrate: 2_000_000,
        }];
        let subtitles = vec![SubtitleTrack {
            lang: "en".to_string(),
            label: "English".to_string(),
            url: "https://m/en.vtt".to_string(),
        }];

        wire_player(
            &mut surface,
            "https://m/video/u/playlist.m3u8",
            &audio,
            &levels,
            &subtitles,
        );

        assert_eq!(
            surface.source.as_deref(),
            Some("https://m/video/u/playlist.m3u8")
        );
        assert_eq!(surface.audio.len(), 1);
        assert_eq!(surface.audio[0].label, "Main (en)");
        assert_eq!(surface.quality.len(), 2, "Auto + one level");
        assert_eq!(surface.subtitles[0].label, "English");
    }

    #[test]
    fn wire_catalog_item_builds_playlist_and_subtitles() {
        let mut surface = RecordingSurface::default();
        let metadata = json!([{ "lang": "th" }]);

        wire_catalog_item(&mut surface, "https://m", "uuid-9", Some(&metadata));

        assert_eq!(
            surface.source.as_deref(),
            Some("https://m/video/uuid-9/playlist.m3u8")
        );
        assert_eq!(surface.subtitles.len(), 1);
        assert_eq!(surface.quality[0].label, "Auto");
    }
}
