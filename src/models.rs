//! Data structures and types for webtortui
//!
//! Contains the shared models used across the application organized by domain:
//! - **Lists**: list kinds, playback modes, and the rendered list view
//! - **Entries**: playable entries (channels and user-added torrents) and logos

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Group assigned to every torrent entry
pub const TORRENT_GROUP: &str = "Torrent (Webtor)";

/// Fallback title for torrents added without one
pub const DEFAULT_TORRENT_TITLE: &str = "Torrent";

// =============================================================================
// List Models
// =============================================================================

/// Discriminator identifying which logical list is active in the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListKind(&'static str);

impl ListKind {
    /// Built-in channel list
    pub const CHANNELS: ListKind = ListKind("channels");
    /// User-managed torrent list
    pub const TORRENTS: ListKind = ListKind("torrents");

    pub const fn new(name: &'static str) -> Self {
        ListKind(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// How the current entry is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Nothing playing
    #[default]
    Idle,
    /// Played directly by the player
    Native,
    /// Played inside the embedded overlay frame
    Iframe,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackMode::Idle => write!(f, "idle"),
            PlaybackMode::Native => write!(f, "native"),
            PlaybackMode::Iframe => write!(f, "iframe"),
        }
    }
}

// =============================================================================
// Entry Models
// =============================================================================

/// Logo shown next to an entry: a text glyph or an image URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Logo {
    Text(String),
    Image(String),
}

impl Logo {
    /// Derive a text logo from a name: first character, upper-cased, `?` if blank
    pub fn from_name(name: &str) -> Self {
        let glyph = name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "?".to_string());
        Logo::Text(glyph)
    }

    /// Text to display in a terminal cell
    pub fn glyph(&self) -> &str {
        match self {
            Logo::Text(value) => value,
            Logo::Image(_) => "▣",
        }
    }
}

/// A playable entry
///
/// Torrent entries are persisted as a JSON array, so field names follow the
/// stored format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    #[serde(deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(rename = "isIframe", deserialize_with = "null_as_default")]
    pub is_iframe: bool,
    #[serde(rename = "isFavorite", deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    /// Playback must go through the torrent overlay
    #[serde(rename = "__webtor", deserialize_with = "null_as_default")]
    pub webtor: bool,
}

/// Stored `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entry {
    /// Build a torrent entry with a fresh id
    pub fn torrent(title: &str, src: &str) -> Self {
        let title = title.trim();
        let name = if title.is_empty() {
            DEFAULT_TORRENT_TITLE.to_string()
        } else {
            title.to_string()
        };

        Self {
            id: Self::generate_id(),
            logo: Some(Logo::from_name(&name)),
            name,
            url: src.trim().to_string(),
            group: TORRENT_GROUP.to_string(),
            is_iframe: true,
            is_favorite: false,
            webtor: true,
        }
    }

    /// Generate a locally unique entry id
    pub fn generate_id() -> String {
        format!("tw-{}", Uuid::new_v4().simple())
    }

    /// Logo to display, derived from the name when none was stored
    pub fn logo_or_derived(&self) -> Logo {
        self.logo
            .clone()
            .unwrap_or_else(|| Logo::from_name(&self.name))
    }

    /// Name with runs of whitespace collapsed, falling back to the default title
    pub fn display_name(&self) -> String {
        let normalized = self.name.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            DEFAULT_TORRENT_TITLE.to_string()
        } else {
            normalized
        }
    }

    /// Case-insensitive substring match over name and url
    ///
    /// A blank query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", self.name, self.url).to_lowercase();
        haystack.contains(&query.to_lowercase())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.display_name(), self.url)
    }
}

/// What the now-playing panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    /// Short source tag, e.g. `WEBTOR` or `LIVE`
    pub tag: String,
}

// =============================================================================
// Rendered List View
// =============================================================================

/// Why a list renders no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The list itself is empty
    NoEntries,
    /// Entries exist but none match the current search
    NoMatches,
}

/// One visible row of a rendered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position in the full, unfiltered list
    pub index: usize,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub logo: Logo,
    /// Short status badge (empty when there is nothing to report)
    pub badge: String,
    pub tags: Vec<&'static str>,
    pub favorite: bool,
    pub active: bool,
}

impl Row {
    /// 1-based number shown in front of the title
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Output of rendering a list provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub kind: ListKind,
    pub rows: Vec<Row>,
    pub empty: Option<EmptyState>,
    /// Text shown instead of rows for the current empty state
    pub empty_message: Option<&'static str>,
}

impl ListView {
    /// View with rows
    pub fn with_rows(kind: ListKind, rows: Vec<Row>) -> Self {
        Self {
            kind,
            rows,
            empty: None,
            empty_message: None,
        }
    }

    /// View with no visible rows
    pub fn empty(kind: ListKind, state: EmptyState, message: &'static str) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            empty: Some(state),
            empty_message: Some(message),
        }
    }

    /// Row position of the active entry among visible rows
    pub fn active_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_from_name() {
        assert_eq!(Logo::from_name("movie"), Logo::Text("M".into()));
        assert_eq!(Logo::from_name("  écran"), Logo::Text("É".into()));
        assert_eq!(Logo::from_name("   "), Logo::Text("?".into()));
    }

    #[test]
    fn test_torrent_entry_defaults() {
        let entry = Entry::torrent("  ", " magnet:?xt=urn:btih:ABC ");
        assert_eq!(entry.name, "Torrent");
        assert_eq!(entry.url, "magnet:?xt=urn:btih:ABC");
        assert_eq!(entry.group, TORRENT_GROUP);
        assert!(entry.is_iframe);
        assert!(entry.webtor);
        assert!(!entry.is_favorite);
        assert!(entry.id.starts_with("tw-"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Entry::generate_id(), Entry::generate_id());
    }

    #[test]
    fn test_matches_search() {
        let entry = Entry::torrent("Big Buck Bunny", "magnet:?xt=urn:btih:DEADBEEF");
        assert!(entry.matches_search(""));
        assert!(entry.matches_search("  bunny "));
        assert!(entry.matches_search("deadbeef"));
        assert!(!entry.matches_search("sintel"));
    }

    #[test]
    fn test_display_name_collapses_whitespace() {
        let mut entry = Entry::torrent("x", "magnet:?x");
        entry.name = "  Big   Buck\tBunny ".into();
        assert_eq!(entry.display_name(), "Big Buck Bunny");
    }

    #[test]
    fn test_entry_json_field_names() {
        let entry = Entry::torrent("Movie", "magnet:?xt=urn:btih:ABC");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["isIframe"], true);
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["__webtor"], true);
        assert_eq!(json["logo"]["type"], "text");
        assert_eq!(json["logo"]["value"], "M");
    }

    #[test]
    fn test_list_kind_display() {
        assert_eq!(ListKind::TORRENTS.to_string(), "torrents");
        assert_eq!(ListKind::CHANNELS.as_str(), "channels");
    }
}
