//! Torrent list tests
//!
//! Covers adding sources, overlay targets, playback through the host,
//! wrap-around navigation, deletion and favourites, with both in-memory and
//! on-disk storage.

use tempfile::TempDir;
use webtortui::host::{Host, ListError, ListProvider, PlayerState};
use webtortui::models::{EmptyState, ListKind, PlaybackMode};
use webtortui::store::{self, FileStorage, MemoryStorage, Storage, TORRENTS_KEY};
use webtortui::torrents::{overlay_url, TorrentList, STATUS_PLAYING};

// =============================================================================
// Helpers
// =============================================================================

fn memory_list() -> (TorrentList, MemoryStorage) {
    let storage = MemoryStorage::new();
    (TorrentList::load(Box::new(storage.clone())), storage)
}

fn host_with_torrents(n: usize) -> Host {
    let (list, _) = memory_list();
    let mut host = Host::new();
    host.register(Box::new(list));
    for i in 0..n {
        host.add_entry(
            ListKind::TORRENTS,
            &format!("Movie {}", i + 1),
            &format!("magnet:?xt=urn:btih:{:04}", i + 1),
        )
        .unwrap();
    }
    host
}

fn current_name(host: &Host) -> String {
    host.state.current_entry().unwrap().name.clone()
}

// =============================================================================
// Adding
// =============================================================================

#[test]
fn test_add_to_empty_store() {
    let (mut list, storage) = memory_list();
    let mut state = PlayerState::new();

    list.add("Movie", "magnet:?xt=urn:btih:ABC", &mut state)
        .unwrap();

    assert_eq!(list.len(), 1);
    let entry = &list.entries()[0];
    assert_eq!(entry.name, "Movie");
    assert_eq!(entry.url, "magnet:?xt=urn:btih:ABC");
    assert_eq!(state.current_entry_id(), Some(entry.id.as_str()));
    assert_eq!(
        state.iframe_src.as_deref(),
        Some("webtor-overlay.html?src=magnet%3A%3Fxt%3Durn%3Abtih%3AABC")
    );
    assert_eq!(state.status.as_deref(), Some(STATUS_PLAYING));

    let stored = store::load_entries(&storage, TORRENTS_KEY).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, entry.id);
}

#[test]
fn test_add_rejects_non_torrent_source() {
    let (mut list, storage) = memory_list();
    let mut state = PlayerState::new();

    let err = list.add("Movie", "not-a-magnet", &mut state).unwrap_err();
    assert!(matches!(err, ListError::NotTorrentSource(_)));
    assert!(list.is_empty());
    assert!(state.status.is_some());
    assert!(state.current_entry().is_none());
    assert!(storage.raw(TORRENTS_KEY).is_none());
}

#[test]
fn test_add_rejects_blank_source() {
    let (mut list, _) = memory_list();
    let mut state = PlayerState::new();

    assert!(matches!(
        list.add("Movie", "   ", &mut state),
        Err(ListError::EmptySource)
    ));
    assert!(list.is_empty());
}

#[test]
fn test_add_without_title_uses_default() {
    let (mut list, _) = memory_list();
    let mut state = PlayerState::new();

    list.add("", "https://example.org/sintel.torrent", &mut state)
        .unwrap();
    assert_eq!(list.entries()[0].display_name(), "Torrent");
    assert_eq!(state.now_playing.as_ref().unwrap().title, "Torrent");
}

#[test]
fn test_custom_overlay_page() {
    let storage = MemoryStorage::new();
    let mut list = TorrentList::load(Box::new(storage)).with_overlay_page("https://player.example/o.html");
    let mut state = PlayerState::new();

    list.add("Movie", "magnet:?xt=urn:btih:ABC", &mut state)
        .unwrap();
    assert_eq!(
        state.iframe_src.as_deref(),
        Some("https://player.example/o.html?src=magnet%3A%3Fxt%3Durn%3Abtih%3AABC")
    );
    assert_eq!(
        list.overlay_target("magnet:?xt=urn:btih:ABC"),
        overlay_url("https://player.example/o.html", "magnet:?xt=urn:btih:ABC")
    );
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_next_and_previous_wrap() {
    let mut host = host_with_torrents(3);
    // The last added entry is playing
    assert_eq!(current_name(&host), "Movie 3");
    assert_eq!(host.state.counter, "3/3");

    host.play_next().unwrap();
    assert_eq!(current_name(&host), "Movie 1");
    assert_eq!(host.state.counter, "1/3");

    host.play_previous().unwrap();
    assert_eq!(current_name(&host), "Movie 3");

    host.play_previous().unwrap();
    assert_eq!(current_name(&host), "Movie 2");
    assert_eq!(host.state.counter, "2/3");
}

#[test]
fn test_navigation_on_empty_list_is_noop() {
    let mut host = host_with_torrents(0);
    host.play_next().unwrap();
    host.play_previous().unwrap();
    assert!(host.state.current_entry().is_none());
    assert_eq!(host.state.counter, "-/-");
}

#[test]
fn test_play_out_of_range() {
    let mut host = host_with_torrents(2);
    assert!(matches!(
        host.play(ListKind::TORRENTS, 2),
        Err(ListError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn test_play_sets_overlay_mode() {
    let mut host = host_with_torrents(2);
    host.play(ListKind::TORRENTS, 0).unwrap();

    assert_eq!(host.state.mode, PlaybackMode::Iframe);
    assert!(host.state.stream_url.is_none());
    assert_eq!(host.state.now_playing.as_ref().unwrap().tag, "WEBTOR");
    let view = host.view(ListKind::TORRENTS).unwrap();
    assert!(view.rows[0].active);
    assert!(!view.rows[1].active);
}

// =============================================================================
// Deleting and favourites
// =============================================================================

#[test]
fn test_delete_current_stops_and_clamps() {
    let mut host = host_with_torrents(3);
    let last_id = host.state.current_entry_id().unwrap().to_string();

    host.remove_entry(ListKind::TORRENTS, &last_id).unwrap();
    assert!(host.state.current_entry().is_none());
    assert_eq!(host.state.mode, PlaybackMode::Idle);
    let provider = host.provider(ListKind::TORRENTS).unwrap();
    assert_eq!(provider.len(), 2);
    assert_eq!(provider.current_index(), Some(1));
    assert_eq!(host.state.counter, "0/2");
}

#[test]
fn test_delete_current_middle_entry_resets_counter() {
    let mut host = host_with_torrents(3);
    host.play(ListKind::TORRENTS, 1).unwrap();
    assert_eq!(host.state.counter, "2/3");
    let middle_id = host.state.current_entry_id().unwrap().to_string();

    host.remove_entry(ListKind::TORRENTS, &middle_id).unwrap();
    assert!(host.state.current_entry().is_none());
    assert_eq!(host.state.counter, "0/2");

    // Navigation still continues from the clamped index
    host.play_next().unwrap();
    assert_eq!(current_name(&host), "Movie 1");
    assert_eq!(host.state.counter, "1/2");
}

#[test]
fn test_delete_other_entry_keeps_playing() {
    let mut host = host_with_torrents(3);
    let first_id = host.view(ListKind::TORRENTS).unwrap().rows[0].id.clone();

    host.remove_entry(ListKind::TORRENTS, &first_id).unwrap();
    assert_eq!(current_name(&host), "Movie 3");
    assert_eq!(host.provider(ListKind::TORRENTS).unwrap().len(), 2);
}

#[test]
fn test_delete_last_remaining_entry() {
    let mut host = host_with_torrents(1);
    let id = host.state.current_entry_id().unwrap().to_string();

    host.remove_entry(ListKind::TORRENTS, &id).unwrap();
    let view = host.view(ListKind::TORRENTS).unwrap();
    assert_eq!(view.empty, Some(EmptyState::NoEntries));
    assert_eq!(view.empty_message, Some("No torrents added."));
    assert_eq!(host.provider(ListKind::TORRENTS).unwrap().current_index(), None);
    assert_eq!(host.state.counter, "-/-");
}

#[test]
fn test_delete_unknown_id() {
    let mut host = host_with_torrents(1);
    assert!(matches!(
        host.remove_entry(ListKind::TORRENTS, "tw-missing"),
        Err(ListError::UnknownId(_))
    ));
}

#[test]
fn test_toggle_favorite_updates_current_entry() {
    let mut host = host_with_torrents(1);
    let id = host.state.current_entry_id().unwrap().to_string();

    assert!(host.toggle_favorite(ListKind::TORRENTS, &id).unwrap());
    assert!(host.state.current_entry().unwrap().is_favorite);
    assert!(host.view(ListKind::TORRENTS).unwrap().rows[0].favorite);

    assert!(!host.toggle_favorite(ListKind::TORRENTS, &id).unwrap());
    assert!(!host.state.current_entry().unwrap().is_favorite);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_filters_rows_and_keeps_indices() {
    let mut host = host_with_torrents(3);
    host.set_search("movie 2");

    let view = host.view(ListKind::TORRENTS).unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].index, 1);
    assert_eq!(view.rows[0].number(), 2);

    host.set_search("sintel");
    let view = host.view(ListKind::TORRENTS).unwrap();
    assert_eq!(view.empty, Some(EmptyState::NoMatches));
    assert_eq!(view.empty_message, Some("No results."));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_list_survives_reload_from_disk() {
    let dir = TempDir::new().unwrap();
    let mut state = PlayerState::new();

    let (first_id, second_id) = {
        let mut list = TorrentList::load(Box::new(FileStorage::new(dir.path())));
        list.add("Movie", "magnet:?xt=urn:btih:ABC", &mut state)
            .unwrap();
        list.add("Sintel", "https://example.org/sintel.torrent", &mut state)
            .unwrap();
        let first = list.entries()[0].id.clone();
        list.toggle_favorite(&first, &mut state).unwrap();
        (first, list.entries()[1].id.clone())
    };

    let reloaded = TorrentList::load(Box::new(FileStorage::new(dir.path())));
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.entries()[0].id, first_id);
    assert!(reloaded.entries()[0].is_favorite);
    assert_eq!(reloaded.entries()[1].id, second_id);
    assert!(reloaded.entries().iter().all(|e| e.webtor && e.is_iframe));
    assert_eq!(reloaded.current_index(), None);
}

#[test]
fn test_corrupt_file_starts_empty_and_is_replaced() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set(TORRENTS_KEY, "{broken").unwrap();

    let mut list = TorrentList::load(Box::new(FileStorage::new(dir.path())));
    assert!(list.is_empty());

    let mut state = PlayerState::new();
    list.add("Movie", "magnet:?xt=urn:btih:ABC", &mut state)
        .unwrap();
    let stored = store::load_entries(&storage, TORRENTS_KEY).unwrap();
    assert_eq!(stored.len(), 1);
}
