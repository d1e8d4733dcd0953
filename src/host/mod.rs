//! Player host and list provider registry
//!
//! The host owns the shared `PlayerState` and dispatches every navigation
//! action (next, previous, counter, scroll, refresh, autoplay, overlay) to the
//! provider registered for the active list kind.
//!
//! - `state`: shared player state
//! - `channels`: built-in channel list

pub mod channels;
pub mod state;

pub use channels::{ChannelConfig, ChannelList};
pub use state::{PlayerState, RadioState};

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Entry, ListKind, ListView, NowPlaying, PlaybackMode};
use crate::store::StoreError;

// =============================================================================
// Errors
// =============================================================================

/// Errors from list operations
///
/// `Store` is returned after the in-memory change was applied: the list is
/// updated, only persisting it failed.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Paste a magnet link (magnet:?) or a .torrent URL")]
    EmptySource,
    #[error("That does not look like a magnet link or a .torrent URL")]
    NotTorrentSource(String),
    #[error("Index {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Entry '{0}' has no source")]
    MissingSource(String),
    #[error("No entry with id '{0}'")]
    UnknownId(String),
    #[error("No '{0}' list registered")]
    UnknownList(ListKind),
    #[error("The {0} list does not support this action")]
    Unsupported(ListKind),
    #[error("Could not save list: {0}")]
    Store(#[from] StoreError),
}

impl ListError {
    /// Whether the list was changed despite the error
    pub fn is_applied(&self) -> bool {
        matches!(self, ListError::Store(_))
    }
}

/// Overlay playback claimed by a provider for one of its entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Source to load in the overlay frame
    pub target: String,
    /// Now-playing tag
    pub tag: &'static str,
    /// Status line message
    pub status: &'static str,
}

// =============================================================================
// List Provider
// =============================================================================

/// A logical list the player can navigate
///
/// Navigation defaults are written in terms of `len`, `current_index` and
/// `play`, so most providers only implement those plus `render`.
pub trait ListProvider {
    fn kind(&self) -> ListKind;

    /// Tab label
    fn label(&self) -> &str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, index: usize) -> Option<&Entry>;

    /// Index of the entry this list last played
    fn current_index(&self) -> Option<usize>;

    /// Render the entries visible under the state's search query
    fn render(&self, state: &PlayerState) -> ListView;

    /// Play the entry at `index` of the full list
    fn play(&mut self, index: usize, state: &mut PlayerState) -> Result<(), ListError>;

    /// Play the following entry, wrapping to the start
    fn play_next(&mut self, state: &mut PlayerState) -> Result<(), ListError> {
        let len = self.len();
        if len == 0 {
            return Ok(());
        }
        let next = match self.current_index() {
            None => 0,
            Some(i) => (i + 1) % len,
        };
        self.play(next, state)
    }

    /// Play the preceding entry, wrapping to the end
    fn play_previous(&mut self, state: &mut PlayerState) -> Result<(), ListError> {
        let len = self.len();
        if len == 0 {
            return Ok(());
        }
        let prev = match self.current_index() {
            None => len - 1,
            Some(i) => (i + len - 1) % len,
        };
        self.play(prev, state)
    }

    fn autoplay_first(&mut self, state: &mut PlayerState) -> Result<(), ListError> {
        if self.is_empty() {
            return Ok(());
        }
        self.play(0, state)
    }

    /// Now-playing counter text
    ///
    /// The position is 0 unless the player is playing this list's current
    /// entry.
    fn counter(&self, state: &PlayerState) -> String {
        let total = self.len();
        if total == 0 {
            return "-/-".to_string();
        }
        let pos = match (self.current_index(), state.current_entry_id()) {
            (Some(i), Some(id)) if self.entry(i).is_some_and(|e| e.id == id) => i + 1,
            _ => 0,
        };
        format!("{}/{}", pos, total)
    }

    /// Visible row holding the active entry
    fn active_row(&self, state: &PlayerState) -> Option<usize> {
        self.render(state).active_row()
    }

    /// Claim overlay playback for an entry this provider understands
    fn overlay_for(&self, _entry: &Entry) -> Option<Overlay> {
        None
    }

    /// Whether the add form applies to this list
    fn accepts_additions(&self) -> bool {
        false
    }

    fn add_entry(
        &mut self,
        _title: &str,
        _src: &str,
        _state: &mut PlayerState,
    ) -> Result<usize, ListError> {
        Err(ListError::Unsupported(self.kind()))
    }

    fn remove_entry(&mut self, _id: &str, _state: &mut PlayerState) -> Result<Entry, ListError> {
        Err(ListError::Unsupported(self.kind()))
    }

    fn toggle_favorite(&mut self, _id: &str, _state: &mut PlayerState) -> Result<bool, ListError> {
        Err(ListError::Unsupported(self.kind()))
    }
}

// =============================================================================
// Host
// =============================================================================

/// The player: shared state plus registered list providers
pub struct Host {
    pub state: PlayerState,
    providers: Vec<Box<dyn ListProvider>>,
    views: HashMap<ListKind, ListView>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self {
            state: PlayerState::new(),
            providers: Vec::new(),
            views: HashMap::new(),
        }
    }

    /// Register a provider; tabs follow registration order
    ///
    /// The first registered provider becomes the active list.
    pub fn register(&mut self, provider: Box<dyn ListProvider>) {
        let kind = provider.kind();
        if self.provider(kind).is_some() {
            warn!(%kind, "list provider already registered, ignoring");
            return;
        }
        debug!(%kind, entries = provider.len(), "registering list provider");
        self.views.insert(kind, provider.render(&self.state));
        self.providers.push(provider);
        if self.state.active_list_kind().is_none() {
            self.state.set_active_list_kind(kind);
            self.update_counter();
        }
    }

    /// Registered kinds with their tab labels
    pub fn tabs(&self) -> Vec<(ListKind, String)> {
        self.providers
            .iter()
            .map(|p| (p.kind(), p.label().to_string()))
            .collect()
    }

    pub fn provider(&self, kind: ListKind) -> Option<&dyn ListProvider> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
    }

    /// Split borrow: the provider for `kind` and the shared state
    fn provider_with_state(
        &mut self,
        kind: ListKind,
    ) -> Option<(&mut (dyn ListProvider + 'static), &mut PlayerState)> {
        let state = &mut self.state;
        self.providers
            .iter_mut()
            .find(|p| p.kind() == kind)
            .map(|p| (p.as_mut(), state))
    }

    pub fn active_kind(&self) -> Option<ListKind> {
        self.state.active_list_kind()
    }

    pub fn active_provider(&self) -> Option<&dyn ListProvider> {
        self.active_kind().and_then(|kind| self.provider(kind))
    }

    /// Last rendered view of a list
    pub fn view(&self, kind: ListKind) -> Option<&ListView> {
        self.views.get(&kind)
    }

    // -------------------------------------------------------------------------
    // Dispatched navigation
    // -------------------------------------------------------------------------

    /// Play an entry of a specific list
    pub fn play(&mut self, kind: ListKind, index: usize) -> Result<(), ListError> {
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.play(index, state);
        self.after_play(kind);
        result
    }

    pub fn play_next(&mut self) -> Result<(), ListError> {
        let Some(kind) = self.active_kind() else {
            return Ok(());
        };
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.play_next(state);
        self.after_play(kind);
        result
    }

    pub fn play_previous(&mut self) -> Result<(), ListError> {
        let Some(kind) = self.active_kind() else {
            return Ok(());
        };
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.play_previous(state);
        self.after_play(kind);
        result
    }

    /// Play the first entry of `kind` if it has one
    pub fn autoplay_first_in_list(&mut self, kind: ListKind) -> Result<(), ListError> {
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.autoplay_first(state);
        self.after_play(kind);
        result
    }

    /// Point the scroll target at the active entry of the active list
    pub fn scroll_to_active(&mut self) {
        let row = self
            .active_provider()
            .and_then(|provider| provider.active_row(&self.state));
        if row.is_some() {
            self.state.scroll_to = row;
        }
    }

    pub fn update_counter(&mut self) {
        let counter = self
            .active_provider()
            .map(|provider| provider.counter(&self.state))
            .unwrap_or_else(|| "-/-".to_string());
        self.state.counter = counter;
    }

    /// Re-render the active list only
    pub fn refresh_active_list(&mut self) {
        if let Some(kind) = self.active_kind() {
            self.refresh(kind);
        }
    }

    /// Re-render one list
    pub fn refresh(&mut self, kind: ListKind) {
        if let Some(provider) = self.provider(kind) {
            let view = provider.render(&self.state);
            self.views.insert(kind, view);
        }
    }

    /// Re-render every list
    pub fn render_lists(&mut self) {
        for provider in &self.providers {
            self.views.insert(provider.kind(), provider.render(&self.state));
        }
    }

    /// Play an entry inside the overlay frame
    ///
    /// A provider that recognises the entry decides the overlay target;
    /// otherwise the entry's own url is loaded.
    pub fn play_entry_as_overlay(&mut self, entry: Entry) {
        let overlay = self
            .providers
            .iter()
            .find_map(|provider| provider.overlay_for(&entry))
            .unwrap_or_else(|| Overlay {
                target: entry.url.clone(),
                tag: "IFRAME",
                status: "Overlay active",
            });

        info!(entry = %entry.id, target = %overlay.target, "playing entry as overlay");
        self.state.now_playing = Some(NowPlaying {
            title: entry.display_name(),
            tag: overlay.tag.to_string(),
        });
        self.state.set_active_entry(entry);
        self.state.mode = PlaybackMode::Iframe;
        self.state.stream_url = None;
        self.state.iframe_src = Some(overlay.target);
        self.state.radio = RadioState::default();
        self.state.set_status(overlay.status);
        self.render_lists();
    }

    /// Switch the active tab
    ///
    /// Stops the radio when leaving for another list, renders the list, and
    /// autoplays its first entry when nothing is playing.
    pub fn activate_tab(&mut self, kind: ListKind) -> Result<(), ListError> {
        if self.provider(kind).is_none() {
            return Err(ListError::UnknownList(kind));
        }

        if !self.state.is_active(kind) && self.state.radio.is_active() {
            self.state.stop_radio();
        }

        self.state.set_active_list_kind(kind);
        self.state.scroll_to = None;
        self.refresh(kind);
        self.update_counter();

        if self.state.current_entry().is_none() {
            self.autoplay_first_in_list(kind)?;
        }
        Ok(())
    }

    /// Update the shared search query and re-render
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
        self.render_lists();
    }

    pub fn stop_playback(&mut self) {
        self.state.stop_playback();
        self.state.set_status("Stopped");
        self.render_lists();
    }

    // -------------------------------------------------------------------------
    // List mutations
    // -------------------------------------------------------------------------

    /// Add an entry to a list that accepts additions
    pub fn add_entry(&mut self, kind: ListKind, title: &str, src: &str) -> Result<usize, ListError> {
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.add_entry(title, src, state);
        match &result {
            Ok(_) => self.after_play(kind),
            Err(e) if e.is_applied() => self.after_play(kind),
            Err(_) => {}
        }
        result
    }

    /// Delete an entry; stops playback when it was the current entry
    pub fn remove_entry(&mut self, kind: ListKind, id: &str) -> Result<Entry, ListError> {
        let was_current = self.state.current_entry_id() == Some(id);
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.remove_entry(id, state);

        let applied = match &result {
            Ok(_) => true,
            Err(e) => e.is_applied(),
        };
        if applied {
            if was_current {
                self.state.stop_playback();
            }
            self.refresh(kind);
            self.update_counter();
        }
        result
    }

    pub fn toggle_favorite(&mut self, kind: ListKind, id: &str) -> Result<bool, ListError> {
        let (provider, state) = self
            .provider_with_state(kind)
            .ok_or(ListError::UnknownList(kind))?;
        let result = provider.toggle_favorite(id, state);
        self.refresh(kind);
        result
    }

    /// Re-render after playback changed, then sync counter and scroll
    fn after_play(&mut self, kind: ListKind) {
        self.render_lists();
        if self.state.is_active(kind) {
            self.update_counter();
            self.scroll_to_active();
        }
    }
}
