//! App state and core application logic
//!
//! Wraps the player `Host` with the terminal-side state: tab and row
//! selection, the search box, the add form, and actions the main loop has to
//! run outside the key handler (opening the overlay).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::host::{Host, ListError};
use crate::models::{ListKind, ListView, Row};

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Search box focused
    Search,
    /// Add form, title field focused
    AddTitle,
    /// Add form, source field focused
    AddSource,
}

impl InputMode {
    pub fn is_editing(&self) -> bool {
        !matches!(self, InputMode::Normal)
    }

    pub fn in_add_form(&self) -> bool {
        matches!(self, InputMode::AddTitle | InputMode::AddSource)
    }
}

/// Work the main loop has to carry out after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand the target to the overlay launcher
    OpenOverlay(String),
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Reset selection
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Text Input
// =============================================================================

/// Single-line text field with a cursor counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key; returns false for keys it does not handle
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_home(),
            KeyCode::End => self.cursor_end(),
            _ => return false,
        }
        true
    }
}

/// Inputs of the add-torrent form
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub title: TextInput,
    pub src: TextInput,
}

impl AddForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.src.clear();
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App {
    /// Player host with its list providers
    pub host: Host,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Search box contents
    pub search: TextInput,
    /// Add form contents
    pub form: AddForm,
    /// Row selection in the active list
    pub list: ListState,
    /// Open the overlay whenever a new overlay target starts playing
    pub auto_open: bool,
    pending: Option<Action>,
}

impl App {
    /// Create a new App around a host
    pub fn new(host: Host) -> Self {
        let mut app = Self {
            host,
            running: true,
            input_mode: InputMode::Normal,
            search: TextInput::default(),
            form: AddForm::default(),
            list: ListState::default(),
            auto_open: false,
            pending: None,
        };
        app.host.refresh_active_list();
        app.sync_selection();
        app
    }

    pub fn with_auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.host.state.set_status(msg);
    }

    pub fn status(&self) -> Option<&str> {
        self.host.state.status.as_deref()
    }

    /// Take the action queued by the last key press
    pub fn take_action(&mut self) -> Option<Action> {
        self.pending.take()
    }

    /// Rendered view of the active list
    pub fn active_view(&self) -> Option<&ListView> {
        self.host.active_kind().and_then(|kind| self.host.view(kind))
    }

    /// Row under the selection
    pub fn selected_row(&self) -> Option<&Row> {
        self.active_view()
            .and_then(|view| view.rows.get(self.list.selected))
    }

    /// Index of the active tab
    pub fn active_tab(&self) -> usize {
        let active = self.host.active_kind();
        self.host
            .tabs()
            .iter()
            .position(|(kind, _)| Some(*kind) == active)
            .unwrap_or(0)
    }

    /// Whether the active list takes new entries
    pub fn can_add(&self) -> bool {
        self.host
            .active_provider()
            .map(|p| p.accepts_additions())
            .unwrap_or(false)
    }

    /// Clamp the selection to the active view and follow the scroll target
    pub fn sync_selection(&mut self) {
        let len = self.active_view().map(|v| v.rows.len()).unwrap_or(0);
        self.list.set_len(len);
        if let Some(row) = self.host.state.scroll_to.take() {
            if row < len {
                self.list.selected = row;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Switch to the tab `step` positions away, wrapping
    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = self.host.tabs();
        if tabs.is_empty() {
            return;
        }
        let current = self.active_tab();
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            (current + tabs.len() - 1) % tabs.len()
        };
        self.switch_tab(tabs[next].0);
    }

    pub fn switch_tab(&mut self, kind: ListKind) {
        debug!(%kind, "switching tab");
        self.list.reset();
        let result = self.host.activate_tab(kind);
        self.report(result);
    }

    /// Play the selected row
    pub fn play_selected(&mut self) {
        let (Some(kind), Some(index)) = (
            self.host.active_kind(),
            self.selected_row().map(|row| row.index),
        ) else {
            return;
        };
        let result = self.host.play(kind, index);
        self.report(result);
    }

    pub fn toggle_selected_favorite(&mut self) {
        let (Some(kind), Some(id)) = (
            self.host.active_kind(),
            self.selected_row().map(|row| row.id.clone()),
        ) else {
            return;
        };
        match self.host.toggle_favorite(kind, &id) {
            Ok(true) => self.set_status("Added to favourites"),
            Ok(false) => self.set_status("Removed from favourites"),
            Err(e) => self.report_error(e),
        }
    }

    pub fn delete_selected(&mut self) {
        let (Some(kind), Some(id)) = (
            self.host.active_kind(),
            self.selected_row().map(|row| row.id.clone()),
        ) else {
            return;
        };
        match self.host.remove_entry(kind, &id) {
            Ok(entry) => self.set_status(format!("Removed {}", entry.display_name())),
            Err(e) => self.report_error(e),
        }
    }

    pub fn play_next(&mut self) {
        let result = self.host.play_next();
        self.report(result);
    }

    pub fn play_previous(&mut self) {
        let result = self.host.play_previous();
        self.report(result);
    }

    /// Replay the current entry inside the overlay
    pub fn play_current_as_overlay(&mut self) {
        match self.host.state.current_entry().cloned() {
            Some(entry) => self.host.play_entry_as_overlay(entry),
            None => self.set_status("Nothing playing"),
        }
    }

    /// Queue the current overlay target (or stream) for the launcher
    pub fn open_overlay(&mut self) {
        let target = self
            .host
            .state
            .iframe_src
            .clone()
            .or_else(|| self.host.state.stream_url.clone());
        match target {
            Some(target) => self.pending = Some(Action::OpenOverlay(target)),
            None => self.set_status("Nothing playing"),
        }
    }

    pub fn open_add_form(&mut self) {
        if self.can_add() {
            self.input_mode = InputMode::AddTitle;
        } else {
            self.set_status("This list does not take new entries");
        }
    }

    /// Submit the add form to the active list
    pub fn submit_add_form(&mut self) {
        let Some(kind) = self.host.active_kind() else {
            return;
        };
        let result = self
            .host
            .add_entry(kind, &self.form.title.value, &self.form.src.value);
        match result {
            Ok(_) => self.close_add_form(),
            Err(e) if e.is_applied() => {
                self.close_add_form();
                self.report_error(e);
            }
            Err(e) => {
                // Keep the form open so the source can be fixed
                self.input_mode = InputMode::AddSource;
                self.report_error(e);
            }
        }
    }

    fn close_add_form(&mut self) {
        self.form.clear();
        self.input_mode = InputMode::Normal;
    }

    fn apply_search(&mut self) {
        self.host.set_search(self.search.value.clone());
        self.list.reset();
    }

    fn report(&mut self, result: Result<(), ListError>) {
        if let Err(e) = result {
            self.report_error(e);
        }
    }

    fn report_error(&mut self, e: ListError) {
        warn!(error = %e, "list action failed");
        self.set_status(e.to_string());
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        let target_before = self.host.state.iframe_src.clone();

        let consumed = match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::AddTitle | InputMode::AddSource => self.handle_form_key(key),
        };

        if self.auto_open && self.pending.is_none() {
            if let Some(target) = &self.host.state.iframe_src {
                if target_before.as_ref() != Some(target) {
                    self.pending = Some(Action::OpenOverlay(target.clone()));
                }
            }
        }

        self.sync_selection();
        consumed
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab | KeyCode::Right => self.cycle_tab(true),
            KeyCode::BackTab | KeyCode::Left => self.cycle_tab(false),
            KeyCode::Up | KeyCode::Char('k') => self.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.list.down(),
            KeyCode::PageUp => self.list.page_up(10),
            KeyCode::PageDown => self.list.page_down(10),
            KeyCode::Home => self.list.first(),
            KeyCode::End => self.list.last(),
            KeyCode::Enter => self.play_selected(),
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') => self.play_next(),
            KeyCode::Char('p') => self.play_previous(),
            KeyCode::Char('s') => self.host.stop_playback(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('o') => self.open_overlay(),
            KeyCode::Char('v') => self.play_current_as_overlay(),
            KeyCode::Esc => {
                if self.search.value.is_empty() {
                    return false;
                }
                self.search.clear();
                self.apply_search();
            }
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            _ => {
                let before = self.search.value.clone();
                let consumed = self.search.handle_key(key);
                if self.search.value != before {
                    self.apply_search();
                }
                consumed
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.close_add_form();
                true
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.input_mode = match self.input_mode {
                    InputMode::AddTitle => InputMode::AddSource,
                    _ => InputMode::AddTitle,
                };
                true
            }
            KeyCode::Enter if self.input_mode == InputMode::AddTitle => {
                self.input_mode = InputMode::AddSource;
                true
            }
            KeyCode::Enter => {
                self.submit_add_form();
                true
            }
            _ => {
                let field = if self.input_mode == InputMode::AddTitle {
                    &mut self.form.title
                } else {
                    &mut self.form.src
                };
                field.handle_key(key)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
