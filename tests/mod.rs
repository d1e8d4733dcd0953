//! Integration tests for webtortui
//!
//! Tests are organized by component:
//! - torrents_test: Torrent list add / play / delete / favourite behavior
//! - store_test: File and memory storage of the torrent list
//! - host_test: Provider dispatch, tabs, overlay playback, counters
//! - cli_test: Argument parsing and JSON output types
//! - ui_test: Theme styles and full-frame rendering
//! - e2e_test: Keyboard flows through the App and CLI command flows

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
