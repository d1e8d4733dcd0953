//! Neon palette and the styles the player views draw with

use ratatui::style::{Color, Modifier, Style};

use crate::app::InputMode;

pub struct Theme;

impl Theme {
    // ─── Palette ────────────────────────────────────────────────────────────

    /// #0a0a0f
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);
    /// Input fields and the status bar sit one step above the background
    pub const PANEL: Color = Color::Rgb(0x14, 0x14, 0x1e);
    /// Cyan, also the focus colour
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);
    /// Magenta, used for everything torrent related
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    pub const DIM: Color = Color::Rgb(0x40, 0x40, 0x50);
    pub const LIVE: Color = Color::Rgb(0x00, 0xff, 0x00);
    pub const RADIO: Color = Color::Rgb(0xff, 0xaa, 0x00);
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    // ─── Building blocks ────────────────────────────────────────────────────

    /// Dark text on a solid colour block
    pub fn badge(color: Color) -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    }

    fn bold(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    // ─── Chrome ─────────────────────────────────────────────────────────────

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Panel titles and the header logo
    pub fn title() -> Style {
        Self::bold(Self::PRIMARY)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Self::bold(Self::ACCENT)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Self::bold(Self::PRIMARY)
    }

    pub fn tab() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn tab_active() -> Style {
        Self::badge(Self::PRIMARY)
    }

    // ─── List rows ──────────────────────────────────────────────────────────

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Self::badge(Self::PRIMARY)
    }

    pub fn logo() -> Style {
        Self::badge(Self::SECONDARY)
    }

    pub fn favorite() -> Style {
        Self::bold(Self::ACCENT)
    }

    /// Playing marker on a row
    pub fn now_playing() -> Style {
        Self::bold(Self::LIVE)
    }

    /// Source tag such as `[TORRENT]` or `[LIVE]`
    pub fn tag(tag: &str) -> Style {
        match tag {
            "TORRENT" | "WEBTOR" => Style::default().fg(Self::SECONDARY),
            "RADIO" => Style::default().fg(Self::RADIO),
            "LIVE" => Style::default().fg(Self::LIVE),
            _ => Style::default().fg(Self::DIM),
        }
    }

    // ─── Player ─────────────────────────────────────────────────────────────

    /// Panel border while something plays
    pub fn playing() -> Style {
        Self::bold(Self::LIVE)
    }

    pub fn radio() -> Style {
        Self::bold(Self::RADIO)
    }

    /// Overlay target or stream url
    pub fn target() -> Style {
        Style::default().fg(Self::DIM)
    }

    // ─── Input and status bar ───────────────────────────────────────────────

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    /// Status bar badge for the input mode
    pub fn mode_badge(mode: InputMode) -> Style {
        match mode {
            InputMode::Normal => Self::badge(Self::PRIMARY),
            InputMode::Search => Self::badge(Self::ACCENT),
            InputMode::AddTitle | InputMode::AddSource => Self::badge(Self::SECONDARY),
        }
    }
}
