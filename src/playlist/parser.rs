use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Playback backend tag stamped on every entry.
pub const PLAYER_TAG: &str = "p2p/player";

/// Placeholder annotation for entries that carry no explicit info text.
pub const DEFAULT_INFO: &str = "พากย์ไทย";

/// Directive that opens a new entry.
const ENTRY_HEADER: &str = "#EXTINF";

/// Option directive that attaches a Referer override to the current entry.
const REFERRER_OPTION: &str = "#EXTVLCOPT:http-referrer=";

/// `key="value"` attribute pairs in an entry header. Keys are word
/// characters and hyphens; values are anything up to the closing quote.
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w[\w-]*)="([^"]*)""#).unwrap());

/// One playable item extracted from a channel list.
///
/// Field order is the serialization order of the JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Playback backend tag, always [`PLAYER_TAG`]
    pub player: String,
    /// Category label from `group-title`, empty if absent
    pub group: String,
    /// Display title (the text after the header comma, trimmed)
    pub name: String,
    /// Free-text annotation, [`DEFAULT_INFO`] unless overridden
    pub info: String,
    /// Logo/thumbnail URL from `tvg-logo`, empty if absent
    pub poster: String,
    /// Media URL or path from the bare line following the header
    pub video: String,
    /// Referer header value to send when requesting `video`
    pub referrer: String,
}

impl Default for Entry {
    fn default() -> Self {
        Entry {
            player: PLAYER_TAG.to_string(),
            group: String::new(),
            name: String::new(),
            info: DEFAULT_INFO.to_string(),
            poster: String::new(),
            video: String::new(),
            referrer: String::new(),
        }
    }
}

impl Entry {
    /// An entry is only emitted once it has both a title and a media URL.
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.video.is_empty()
    }
}

/// Parse channel-list text into an ordered sequence of entries.
///
/// Tolerant by construction: any line-ending convention (`\n`, `\r\n`,
/// `\r`), blank lines, unknown attributes and unrecognized directives are
/// all accepted. Incomplete entries (missing title or media URL) are
/// dropped silently. Never fails on malformed input.
pub fn parse_channel_list(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    // Splitting on both separator chars turns \r\n into an empty segment,
    // which the blank-line skip below swallows.
    for raw in text.split(['\r', '\n']) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(ENTRY_HEADER) {
            flush(&mut entries, &mut current);

            let mut entry = Entry::default();
            // Everything before the first comma is the attribute header,
            // everything after is the display title. A header without a
            // comma has no title and gets dropped at the next flush.
            let (header, title) = rest.split_once(',').unwrap_or((rest, ""));
            for caps in ATTR_RE.captures_iter(header) {
                match &caps[1] {
                    "group-title" => entry.group = caps[2].to_string(),
                    "tvg-logo" => entry.poster = caps[2].to_string(),
                    _ => {}
                }
            }
            entry.name = title.trim().to_string();
            current = Some(entry);
        } else if let Some(value) = line.strip_prefix(REFERRER_OPTION) {
            // Only meaningful once an entry has been opened
            if let Some(entry) = current.as_mut() {
                entry.referrer = value.to_string();
            }
        } else if !line.starts_with('#') {
            // Bare line: the media URL for the entry in progress.
            // A repeated bare line overwrites — last one wins.
            if let Some(entry) = current.as_mut() {
                entry.video = line.to_string();
            }
        }
        // Any other directive/comment line is ignored
    }

    flush(&mut entries, &mut current);

    debug!("Parsed {} playlist entries", entries.len());
    entries
}

/// Finalize the in-progress entry: emit it if complete, discard otherwise.
fn flush(entries: &mut Vec<Entry>, current: &mut Option<Entry>) {
    if let Some(entry) = current.take()
        && entry.is_complete()
    {
        entries.push(entry);
    }
}
