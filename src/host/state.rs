//! Shared player state
//!
//! The single state object handed to every list provider. Providers read and
//! write it only for the duration of one call.

use crate::models::{Entry, ListKind, NowPlaying, PlaybackMode};

/// Radio overlay state owned by the player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadioState {
    /// Radio overlay is on screen
    pub overlay_open: bool,
    /// Radio audio is playing
    pub playing: bool,
    /// Entry id of the station being played
    pub entry_id: Option<String>,
}

impl RadioState {
    pub fn is_active(&self) -> bool {
        self.overlay_open || self.playing
    }
}

/// Player state shared between the host and its list providers
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    active_kind: Option<ListKind>,
    current_entry: Option<Entry>,

    /// How the current entry is played
    pub mode: PlaybackMode,
    /// Source loaded in the overlay frame
    pub iframe_src: Option<String>,
    /// Source handed to the native player
    pub stream_url: Option<String>,
    pub now_playing: Option<NowPlaying>,
    /// Status line message
    pub status: Option<String>,
    /// Position counter for the active list, e.g. `2/5`
    pub counter: String,
    /// Search query shared by every list
    pub search: String,
    pub radio: RadioState,
    /// Visible row the list view should scroll to
    pub scroll_to: Option<usize>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            counter: "-/-".to_string(),
            ..Self::default()
        }
    }

    /// Which list currently drives navigation
    pub fn active_list_kind(&self) -> Option<ListKind> {
        self.active_kind
    }

    pub fn set_active_list_kind(&mut self, kind: ListKind) {
        self.active_kind = Some(kind);
    }

    pub fn is_active(&self, kind: ListKind) -> bool {
        self.active_kind == Some(kind)
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.current_entry.as_ref()
    }

    pub fn current_entry_id(&self) -> Option<&str> {
        self.current_entry.as_ref().map(|e| e.id.as_str())
    }

    pub fn set_active_entry(&mut self, entry: Entry) {
        self.current_entry = Some(entry);
    }

    /// Update the current entry in place when its id matches
    pub fn update_active_entry(&mut self, entry: &Entry) {
        if let Some(current) = self.current_entry.as_mut() {
            if current.id == entry.id {
                *current = entry.clone();
            }
        }
    }

    pub fn clear_active_entry(&mut self) {
        self.current_entry = None;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Drop whatever is playing
    pub fn stop_playback(&mut self) {
        self.radio = RadioState::default();
        self.current_entry = None;
        self.mode = PlaybackMode::Idle;
        self.iframe_src = None;
        self.stream_url = None;
        self.now_playing = None;
    }

    /// Stop the radio, and its playback if the radio owns the current entry
    pub fn stop_radio(&mut self) {
        let station = self.radio.entry_id.take();
        self.radio.overlay_open = false;
        self.radio.playing = false;
        if station.is_some() && station.as_deref() == self.current_entry_id() {
            self.stop_playback();
        }
        self.set_status("Radio stopped");
    }
}
