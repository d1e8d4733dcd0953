//! Terminal UI components
//!
//! Built with ratatui for a cyberpunk neon aesthetic.
//! Keyboard-first navigation throughout.

pub mod list;
pub mod player;
pub mod search;
pub mod theme;

pub use list::ListPanel;
pub use player::PlayerView;
pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

/// Height of the now-playing panel
const PLAYER_HEIGHT: u16 = 9;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, tabs, list, now playing, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(PLAYER_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_list(frame, chunks[2], app);
    PlayerView::new(&app.host.state).render(frame, chunks[3]);
    render_status_bar(frame, chunks[4], app);

    if app.input_mode.in_add_form() {
        search::render_add_form(frame, area, &app.form, app.input_mode);
    }
}

/// Render the header with logo and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("WEBTOR", Theme::title()),
        Span::styled("TUI", Theme::secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    search::render_search(
        frame,
        header_chunks[1],
        &app.search,
        app.input_mode == InputMode::Search,
    );
}

/// Tab bar, one tab per registered list
fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.host.active_kind();
    let mut spans = Vec::new();
    for (kind, label) in app.host.tabs() {
        let style = if Some(kind) == active {
            Theme::tab_active()
        } else {
            Theme::tab()
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.active_view() else {
        let empty = Paragraph::new("No lists registered")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::border()),
            );
        frame.render_widget(empty, area);
        return;
    };

    let title = app
        .host
        .active_provider()
        .map(|p| p.label().to_string())
        .unwrap_or_default();

    let mut selection = app.list.clone();
    selection.scroll_into_view(area.height.saturating_sub(2) as usize);

    ListPanel::new(view, &title)
        .selected(selection.selected, selection.offset)
        .render(frame, area);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_label = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Search => " SEARCH ",
        InputMode::AddTitle | InputMode::AddSource => " ADD ",
    };
    let mode_indicator = Span::styled(mode_label, Theme::mode_badge(app.input_mode));

    let message = match app.status() {
        Some(msg) => Span::styled(format!(" {} ", msg), Theme::text()),
        None => Span::raw(""),
    };

    let help = Span::styled(
        " q:quit  /:search  a:add  f:fav  d:delete  Tab:switch list ",
        Theme::dimmed(),
    );

    let status_line = Line::from(vec![mode_indicator, message, Span::raw(" │ "), help]);
    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
