//! Channel-list playlists: parsing and source loading.
//!
//! The wire format is the EXTM3U family used by IPTV channel lists:
//! `#EXTINF` header lines carrying `key="value"` attributes and a display
//! title, optional `#EXTVLCOPT` option lines, and bare media-URL lines.

pub mod parser;
pub mod source;

pub use parser::{Entry, parse_channel_list};
