//! CLI Command Handlers
//!
//! Implements the CLI commands on top of the torrent list and its file
//! storage. Each handler takes CLI args, the loaded config and Output,
//! returns ExitCode.

use tracing::info;

use crate::cli::{
    AddCmd, AddResponse, EntryInfo, ExitCode, FavoriteCmd, FavoriteResponse, ListCmd, Output,
    PlayCmd, PlayResponse, RemoveCmd, RemoveResponse,
};
use crate::config::Config;
use crate::host::{ListProvider, PlayerState};
use crate::store::FileStorage;
use crate::stream::OverlayLauncher;
use crate::torrents::TorrentList;

/// Open the torrent list stored under the configured data directory
pub fn open_torrent_list(config: &Config) -> Option<TorrentList> {
    let dir = config.storage_dir()?;
    let list = TorrentList::load(Box::new(FileStorage::new(dir)))
        .with_overlay_page(config.overlay_page.clone());
    Some(list)
}

fn require_list(config: &Config, output: &Output) -> Result<TorrentList, ExitCode> {
    open_torrent_list(config).ok_or_else(|| {
        output.error(
            "No data directory available. Set `data_dir` in the config file.",
            ExitCode::StorageError,
        )
    })
}

fn format_entry(entry: &EntryInfo) -> String {
    let star = if entry.favorite { "★" } else { " " };
    format!(
        "{:>3}. {} {}  <{}>  [{}]",
        entry.number, star, entry.name, entry.url, entry.id
    )
}

// =============================================================================
// List Command
// =============================================================================

pub fn list_cmd(cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let list = match require_list(config, output) {
        Ok(list) => list,
        Err(code) => return code,
    };

    let query = cmd.search.unwrap_or_default();
    let entries: Vec<EntryInfo> = list
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.matches_search(&query))
        .filter(|(_, e)| !cmd.favorites || e.is_favorite)
        .map(|(i, e)| EntryInfo {
            number: i + 1,
            id: e.id.clone(),
            name: e.display_name(),
            url: e.url.clone(),
            favorite: e.is_favorite,
        })
        .collect();

    let empty_message = if list.is_empty() {
        "No torrents added."
    } else {
        "No results."
    };

    let printed = output.print(&entries, |entries| {
        if entries.is_empty() {
            empty_message.to_string()
        } else {
            entries
                .iter()
                .map(format_entry)
                .collect::<Vec<_>>()
                .join("\n")
        }
    });
    if let Err(e) = printed {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Add Command
// =============================================================================

pub fn add_cmd(cmd: AddCmd, config: &Config, output: &Output) -> ExitCode {
    let mut list = match require_list(config, output) {
        Ok(list) => list,
        Err(code) => return code,
    };
    let mut state = PlayerState::new();
    let title = cmd.title.unwrap_or_default();

    let index = match list.add(&title, &cmd.src, &mut state) {
        Ok(index) => index,
        Err(e) => return output.list_error(&e),
    };

    let Some(entry) = list.get(index) else {
        return output.error("Added entry vanished", ExitCode::Error);
    };
    info!(id = %entry.id, "added torrent from cli");

    let response = AddResponse {
        number: index + 1,
        id: entry.id.clone(),
        name: entry.display_name(),
        target: list.overlay_target(&entry.url),
    };
    if let Err(e) = output.print(&response, |r| format!("Added #{} {} [{}]", r.number, r.name, r.id)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Remove Command
// =============================================================================

pub fn remove_cmd(cmd: RemoveCmd, config: &Config, output: &Output) -> ExitCode {
    let mut list = match require_list(config, output) {
        Ok(list) => list,
        Err(code) => return code,
    };

    let removed = match list.remove(&cmd.id) {
        Ok(entry) => entry,
        Err(e) => return output.list_error(&e),
    };

    let response = RemoveResponse {
        id: removed.id.clone(),
        name: removed.display_name(),
        remaining: list.len(),
    };
    if let Err(e) = output.print(&response, |r| format!("Removed {} ({} left)", r.name, r.remaining)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Favorite Command
// =============================================================================

pub fn favorite_cmd(cmd: FavoriteCmd, config: &Config, output: &Output) -> ExitCode {
    let mut list = match require_list(config, output) {
        Ok(list) => list,
        Err(code) => return code,
    };
    let mut state = PlayerState::new();

    let favorite = match list.toggle_favorite(&cmd.id, &mut state) {
        Ok(favorite) => favorite,
        Err(e) => return output.list_error(&e),
    };

    let response = FavoriteResponse {
        id: cmd.id,
        favorite,
    };
    let printed = output.print(&response, |r| {
        if r.favorite {
            format!("★ {} added to favourites", r.id)
        } else {
            format!("{} removed from favourites", r.id)
        }
    });
    if let Err(e) = printed {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Play Command
// =============================================================================

pub async fn play_cmd(cmd: PlayCmd, config: &Config, output: &Output) -> ExitCode {
    let mut list = match require_list(config, output) {
        Ok(list) => list,
        Err(code) => return code,
    };
    let mut state = PlayerState::new();
    let index = cmd.list_index();

    if let Err(e) = list.play(index, &mut state) {
        return output.list_error(&e);
    }

    let (Some(entry), Some(target)) = (state.current_entry(), state.iframe_src.clone()) else {
        return output.error("Nothing to play", ExitCode::Error);
    };

    let mut opened = false;
    if cmd.open {
        let launcher = OverlayLauncher::new(config.opener.clone(), config.overlay_base.clone());
        output.info(format!("Opening overlay with {}...", launcher.opener()));
        match launcher.open_and_wait(&target).await {
            Ok(()) => opened = true,
            Err(e) => return output.error(e.to_string(), ExitCode::Error),
        }
    }

    let response = PlayResponse {
        number: index + 1,
        id: entry.id.clone(),
        name: entry.display_name(),
        target,
        counter: list.counter(&state),
        opened,
    };
    if let Err(e) = output.print(&response, |r| {
        format!("▶ {} ({})\n{}", r.name, r.counter, r.target)
    }) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
