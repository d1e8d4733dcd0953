//! CLI - Command Line Interface for webtortui
//!
//! Every torrent-list action in the TUI is scriptable. Output is
//! JSON-parseable with `--json` (the default when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! # Add a torrent and list the saved ones
//! webtortui add "magnet:?xt=urn:btih:..." --title "Big Buck Bunny"
//! webtortui list --search bunny --json
//!
//! # Play the first entry and open the overlay in the browser
//! webtortui play 1 --open
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::host::ListError;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Entry not found
    NotFound = 3,
    /// Torrent list could not be read or saved
    StorageError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<&ListError> for ExitCode {
    fn from(err: &ListError) -> ExitCode {
        match err {
            ListError::EmptySource | ListError::NotTorrentSource(_) => ExitCode::InvalidArgs,
            ListError::IndexOutOfRange { .. } | ListError::UnknownId(_) => ExitCode::NotFound,
            ListError::Store(_) => ExitCode::StorageError,
            ListError::MissingSource(_)
            | ListError::UnknownList(_)
            | ListError::Unsupported(_) => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// webtortui - Cyberpunk TUI player with a torrent list
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "webtortui",
    version,
    author = "Gorka & Hermes",
    about = "Cyberpunk TUI player with a Webtor torrent list",
    long_about = "A neon-soaked terminal player. Keep a list of magnet links and \
                  .torrent URLs and play them through the Webtor overlay.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  webtortui                                Launch interactive TUI\n\
                  webtortui add \"magnet:?xt=...\" -t Movie  Add a torrent\n\
                  webtortui list --json                    List saved torrents\n\
                  webtortui play 1 --open                  Play and open the overlay"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List saved torrents
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Add a magnet link or .torrent URL
    Add(AddCmd),

    /// Remove a torrent by id
    #[command(visible_alias = "rm")]
    Remove(RemoveCmd),

    /// Toggle the favourite flag of a torrent
    #[command(visible_alias = "fav")]
    Favorite(FavoriteCmd),

    /// Play a torrent and print its overlay target
    Play(PlayCmd),
}

/// List saved torrents
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Case-insensitive filter over title and source
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only favourites
    #[arg(long, short = 'f')]
    pub favorites: bool,
}

/// Add a torrent to the list
#[derive(Args, Debug)]
pub struct AddCmd {
    /// Magnet link (magnet:?...) or .torrent URL
    #[arg(required = true)]
    pub src: String,

    /// Display title (defaults to "Torrent")
    #[arg(long, short = 't')]
    pub title: Option<String>,
}

/// Remove a torrent
#[derive(Args, Debug)]
pub struct RemoveCmd {
    /// Entry id, as printed by `list`
    #[arg(required = true)]
    pub id: String,
}

/// Toggle a favourite
#[derive(Args, Debug)]
pub struct FavoriteCmd {
    /// Entry id, as printed by `list`
    #[arg(required = true)]
    pub id: String,
}

/// Play a torrent
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// Entry number, as printed by `list` (starting at 1)
    #[arg(required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub index: u32,

    /// Open the overlay target with the configured opener
    #[arg(long, short = 'o')]
    pub open: bool,
}

impl PlayCmd {
    /// Zero-based list index
    pub fn list_index(&self) -> usize {
        (self.index as usize).saturating_sub(1)
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// One torrent as printed by `list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    /// 1-based position in the full list
    pub number: usize,
    pub id: String,
    pub name: String,
    pub url: String,
    pub favorite: bool,
}

/// `add` response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddResponse {
    pub number: usize,
    pub id: String,
    pub name: String,
    pub target: String,
}

/// `remove` response
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveResponse {
    pub id: String,
    pub name: String,
    pub remaining: usize,
}

/// `favorite` response
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub id: String,
    pub favorite: bool,
}

/// `play` response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayResponse {
    pub number: usize,
    pub id: String,
    pub name: String,
    pub target: String,
    pub counter: String,
    pub opened: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data; `human` renders the non-JSON form
    pub fn print<T: Serialize>(&self, data: T, human: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", human(&data));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print a list error with its exit code
    pub fn list_error(&self, err: &ListError) -> ExitCode {
        self.error(err.to_string(), ExitCode::from(err))
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_add_command() {
        let cli = Cli::parse_from(["webtortui", "add", "magnet:?xt=urn:btih:ABC", "-t", "Movie"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Add(cmd)) = cli.command {
            assert_eq!(cmd.src, "magnet:?xt=urn:btih:ABC");
            assert_eq!(cmd.title.as_deref(), Some("Movie"));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_play_index_is_one_based() {
        let cli = Cli::parse_from(["webtortui", "play", "3", "--open"]);
        if let Some(Command::Play(cmd)) = cli.command {
            assert_eq!(cmd.list_index(), 2);
            assert!(cmd.open);
        } else {
            panic!("Expected Play command");
        }

        assert!(Cli::try_parse_from(["webtortui", "play", "0"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["webtortui", "--json", "--quiet", "-c", "/tmp/c.toml", "ls"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Some(Command::List(_))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NotFound), 3);
        assert_eq!(i32::from(ExitCode::StorageError), 4);
    }

    #[test]
    fn test_exit_code_from_list_error() {
        assert_eq!(ExitCode::from(&ListError::EmptySource), ExitCode::InvalidArgs);
        assert_eq!(
            ExitCode::from(&ListError::UnknownId("x".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from(&ListError::IndexOutOfRange { index: 4, len: 1 }),
            ExitCode::NotFound
        );
    }
}
