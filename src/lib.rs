//! webtortui - Cyberpunk TUI player with a Webtor torrent list
//!
//! A neon-soaked terminal player whose navigation is driven by list
//! providers. Next to the configured channels it keeps a user-managed,
//! persisted list of magnet links and .torrent URLs that play through the
//! Webtor overlay page.
//!
//! # Modules
//!
//! - `models` - Entries, list kinds, rendered list views
//! - `store` - Key/value storage for the torrent list
//! - `host` - Player state, list provider trait, the dispatching host
//! - `torrents` - Torrent list provider and source helpers
//! - `stream` - Overlay launcher
//! - `ui` - TUI components
//! - `app` - Application state and key handling
//! - `cli` / `commands` - Scriptable command line

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod models;
pub mod store;
pub mod stream;
pub mod torrents;
pub mod ui;

// Re-export commonly used types
pub use models::{EmptyState, Entry, ListKind, ListView, Logo, PlaybackMode, Row};

pub use app::App;
pub use config::Config;
pub use host::{Host, ListError, ListProvider, PlayerState};
pub use store::{FileStorage, MemoryStorage, Storage, StoreError};
pub use stream::OverlayLauncher;
pub use torrents::TorrentList;
