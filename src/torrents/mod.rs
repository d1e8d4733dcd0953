//! User-managed torrent list
//!
//! - `source`: magnet/torrent-URL heuristic and overlay target building
//! - `list`: the `TorrentList` provider, persisted through a `Storage`

pub mod list;
pub mod source;

pub use list::TorrentList;
pub use source::{encode_uri_component, is_probably_torrent_source, overlay_url, OVERLAY_PAGE};

/// Now-playing tag for torrents
pub const WEBTOR_TAG: &str = "WEBTOR";

/// Status shown when a torrent starts from the list
pub const STATUS_PLAYING: &str = "Torrent playback (Webtor)";

/// Status shown when an entry is switched to the overlay
pub const STATUS_OVERLAY: &str = "Webtor overlay active";
