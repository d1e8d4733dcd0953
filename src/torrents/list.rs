//! Torrent list manager
//!
//! Owns the ordered torrent entries and the index of the last one played.
//! Every mutation is persisted; a failed save is reported as
//! `ListError::Store` after the in-memory change has been applied.

use tracing::{debug, info, warn};

use super::source::{is_probably_torrent_source, overlay_url, OVERLAY_PAGE};
use super::{STATUS_OVERLAY, STATUS_PLAYING, WEBTOR_TAG};
use crate::host::{ListError, ListProvider, Overlay, PlayerState, RadioState};
use crate::models::{
    EmptyState, Entry, ListKind, ListView, NowPlaying, PlaybackMode, Row, TORRENT_GROUP,
};
use crate::store::{self, Storage, TORRENTS_KEY};

/// Torrent list provider
pub struct TorrentList {
    entries: Vec<Entry>,
    /// Index of the last played entry, always `< entries.len()`
    current: Option<usize>,
    storage: Box<dyn Storage>,
    overlay_page: String,
}

impl TorrentList {
    /// Load the list from storage; unreadable data starts an empty list
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let entries = store::load_entries_or_default(storage.as_ref(), TORRENTS_KEY);
        debug!(count = entries.len(), "loaded torrent list");
        Self {
            entries,
            current: None,
            storage,
            overlay_page: OVERLAY_PAGE.to_string(),
        }
    }

    /// Use a different overlay page (path or URL)
    pub fn with_overlay_page(mut self, page: impl Into<String>) -> Self {
        self.overlay_page = page.into();
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Index of the entry with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn overlay_page(&self) -> &str {
        &self.overlay_page
    }

    /// Overlay target for a torrent source
    pub fn overlay_target(&self, src: &str) -> String {
        overlay_url(&self.overlay_page, src)
    }

    /// Validate and append a new torrent, then play it
    ///
    /// Invalid sources set a status message and leave the list untouched.
    pub fn add(&mut self, title: &str, src: &str, state: &mut PlayerState) -> Result<usize, ListError> {
        let src = src.trim();
        if src.is_empty() {
            let err = ListError::EmptySource;
            state.set_status(err.to_string());
            return Err(err);
        }
        if !is_probably_torrent_source(src) {
            let err = ListError::NotTorrentSource(src.to_string());
            state.set_status(err.to_string());
            return Err(err);
        }

        let entry = Entry::torrent(title, src);
        info!(id = %entry.id, name = %entry.name, "adding torrent");
        self.entries.push(entry);
        let index = self.entries.len() - 1;

        let saved = self.persist();
        self.play(index, state)?;
        saved.map(|_| index)
    }

    /// Play the entry at `index` through the overlay
    pub fn play(&mut self, index: usize, state: &mut PlayerState) -> Result<(), ListError> {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            return Err(ListError::IndexOutOfRange { index, len });
        };
        if entry.url.trim().is_empty() {
            return Err(ListError::MissingSource(entry.id.clone()));
        }

        entry.webtor = true;
        entry.is_iframe = true;
        if entry.group.is_empty() {
            entry.group = TORRENT_GROUP.to_string();
        }
        let entry = entry.clone();
        self.current = Some(index);

        let target = self.overlay_target(&entry.url);
        info!(index, id = %entry.id, %target, "playing torrent");

        state.set_active_list_kind(ListKind::TORRENTS);
        state.now_playing = Some(NowPlaying {
            title: entry.display_name(),
            tag: WEBTOR_TAG.to_string(),
        });
        state.set_active_entry(entry);
        state.mode = PlaybackMode::Iframe;
        state.stream_url = None;
        state.iframe_src = Some(target);
        state.radio = RadioState::default();
        state.set_status(STATUS_PLAYING);
        Ok(())
    }

    /// Delete the entry with `id`, clamping the current index
    pub fn remove(&mut self, id: &str) -> Result<Entry, ListError> {
        let index = self
            .position(id)
            .ok_or_else(|| ListError::UnknownId(id.to_string()))?;
        let removed = self.entries.remove(index);
        info!(id, name = %removed.name, "removed torrent");

        if let Some(current) = self.current {
            if current >= self.entries.len() {
                self.current = self.entries.len().checked_sub(1);
            }
        }

        self.persist()?;
        Ok(removed)
    }

    /// Flip the favourite flag of the entry with `id`, returning the new value
    pub fn toggle_favorite(&mut self, id: &str, state: &mut PlayerState) -> Result<bool, ListError> {
        let index = self
            .position(id)
            .ok_or_else(|| ListError::UnknownId(id.to_string()))?;
        let entry = &mut self.entries[index];
        entry.is_favorite = !entry.is_favorite;
        let favorite = entry.is_favorite;
        state.update_active_entry(entry);

        self.persist()?;
        Ok(favorite)
    }

    fn persist(&mut self) -> Result<(), ListError> {
        store::save_entries(self.storage.as_mut(), TORRENTS_KEY, &self.entries).map_err(|e| {
            warn!(error = %e, "failed to save torrent list");
            ListError::Store(e)
        })
    }
}

impl ListProvider for TorrentList {
    fn kind(&self) -> ListKind {
        ListKind::TORRENTS
    }

    fn label(&self) -> &str {
        "🧲 Torrents"
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn render(&self, state: &PlayerState) -> ListView {
        let current_id = state.current_entry_id();
        let rows: Vec<Row> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches_search(&state.search))
            .map(|(index, entry)| Row {
                index,
                id: entry.id.clone(),
                title: entry.display_name(),
                subtitle: TORRENT_GROUP.to_string(),
                logo: entry.logo_or_derived(),
                badge: String::new(),
                tags: vec!["IFRAME", "TORRENT"],
                favorite: entry.is_favorite,
                active: current_id == Some(entry.id.as_str()),
            })
            .collect();

        if !rows.is_empty() {
            ListView::with_rows(ListKind::TORRENTS, rows)
        } else if self.entries.is_empty() {
            ListView::empty(ListKind::TORRENTS, EmptyState::NoEntries, "No torrents added.")
        } else {
            ListView::empty(ListKind::TORRENTS, EmptyState::NoMatches, "No results.")
        }
    }

    fn play(&mut self, index: usize, state: &mut PlayerState) -> Result<(), ListError> {
        TorrentList::play(self, index, state)
    }

    fn overlay_for(&self, entry: &Entry) -> Option<Overlay> {
        if !entry.webtor || entry.url.trim().is_empty() {
            return None;
        }
        Some(Overlay {
            target: self.overlay_target(&entry.url),
            tag: WEBTOR_TAG,
            status: STATUS_OVERLAY,
        })
    }

    fn accepts_additions(&self) -> bool {
        true
    }

    fn add_entry(&mut self, title: &str, src: &str, state: &mut PlayerState) -> Result<usize, ListError> {
        self.add(title, src, state)
    }

    fn remove_entry(&mut self, id: &str, _state: &mut PlayerState) -> Result<Entry, ListError> {
        self.remove(id)
    }

    fn toggle_favorite(&mut self, id: &str, state: &mut PlayerState) -> Result<bool, ListError> {
        TorrentList::toggle_favorite(self, id, state)
    }
}
