//! webtortui - Cyberpunk TUI player with a Webtor torrent list
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! webtortui
//!
//! # CLI mode (for automation)
//! webtortui add "magnet:?xt=urn:btih:..." --title "Big Buck Bunny"
//! webtortui list --json
//! webtortui play 1 --open
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use webtortui::app::{Action, App};
use webtortui::cli::{Cli, Command, ExitCode, Output};
use webtortui::commands;
use webtortui::config::Config;
use webtortui::host::{ChannelList, Host};
use webtortui::stream::OverlayLauncher;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Environment variable holding the log filter
const LOG_ENV: &str = "WEBTORTUI_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = Config::load_or_default(cli.config.as_deref());

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        init_cli_logging();
        report_config_error(config_error);
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        init_tui_logging(&config);
        report_config_error(config_error);
        run_tui(config).await
    }
}

fn report_config_error(error: Option<anyhow::Error>) {
    if let Some(e) = error {
        let error = format!("{:#}", e);
        warn!(%error, "bad config file, using defaults");
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI mode logs to stderr, quiet unless asked for
fn init_cli_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter("warn"))
        .init();
}

/// TUI mode owns the terminal, so logs go to a file in the data directory
fn init_tui_logging(config: &Config) {
    let Some(log_path) = config.log_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_env_filter(env_filter("info"))
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, config, &output),

        Some(Command::Add(cmd)) => commands::add_cmd(cmd, config, &output),

        Some(Command::Remove(cmd)) => commands::remove_cmd(cmd, config, &output),

        Some(Command::Favorite(cmd)) => commands::favorite_cmd(cmd, config, &output),

        Some(Command::Play(cmd)) => commands::play_cmd(cmd, config, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Build the player host: channels first, then the torrent list
fn build_host(config: &Config) -> Host {
    let mut host = Host::new();
    host.register(Box::new(ChannelList::from_config(&config.channels)));

    match commands::open_torrent_list(config) {
        Some(list) => host.register(Box::new(list)),
        None => warn!("no data directory available, torrent list disabled"),
    }
    host
}

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    info!("TUI starting");

    let launcher = OverlayLauncher::new(config.opener.clone(), config.overlay_base.clone());
    if !launcher.is_available().await {
        warn!(opener = %launcher.opener(), "overlay opener not found, `o` will fail");
    }
    let mut app = App::new(build_host(&config)).with_auto_open(config.auto_open);

    let mut terminal = init_terminal()?;

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, &launcher).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    info!("TUI stopped");
    result
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, launcher: &OverlayLauncher) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| webtortui::ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Some(action) = app.take_action() {
            run_action(app, launcher, action).await;
        }
    }

    Ok(())
}

async fn run_action(app: &mut App, launcher: &OverlayLauncher, action: Action) {
    match action {
        Action::OpenOverlay(target) => match launcher.open(&target).await {
            Ok(_child) => app.set_status(format!("Opened in {}", launcher.opener())),
            Err(e) => {
                warn!(error = %e, "could not open overlay");
                app.set_status(e.to_string());
            }
        },
    }
}
