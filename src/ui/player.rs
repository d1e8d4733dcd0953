//! Now Playing panel
//!
//! Shows the entry being played, its source tag, the list counter, the
//! overlay target or stream and the playback mode.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::host::PlayerState;
use crate::models::PlaybackMode;
use crate::ui::Theme;

/// Now-playing panel over the shared player state
#[derive(Debug)]
pub struct PlayerView<'a> {
    pub state: &'a PlayerState,
}

impl<'a> PlayerView<'a> {
    pub fn new(state: &'a PlayerState) -> Self {
        Self { state }
    }

    /// Source shown under the title: overlay target first, then stream url
    pub fn target(&self) -> Option<&str> {
        self.state
            .iframe_src
            .as_deref()
            .or(self.state.stream_url.as_deref())
    }

    fn mode_label(mode: PlaybackMode) -> &'static str {
        match mode {
            PlaybackMode::Idle => "IDLE",
            PlaybackMode::Native => "NATIVE",
            PlaybackMode::Iframe => "OVERLAY",
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let Some(now) = &self.state.now_playing else {
            return vec![
                Line::from(""),
                Line::from(Span::styled("Nothing playing", Theme::dimmed())),
                Line::from(Span::styled(
                    format!("Counter: {}", self.state.counter),
                    Theme::dimmed(),
                )),
            ];
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                now.title.clone(),
                Style::default()
                    .fg(Theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("[{}]", now.tag), Theme::tag(&now.tag)),
                Span::raw("  "),
                Span::styled(self.state.counter.clone(), Theme::accent()),
                Span::raw("  "),
                Span::styled(Self::mode_label(self.state.mode), Theme::secondary()),
            ]),
        ];

        if let Some(target) = self.target() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(target.to_string(), Theme::target())));
        }
        if self.state.radio.is_active() {
            lines.push(Line::from(Span::styled("📻 Radio on", Theme::radio())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" o ", Theme::keybind()),
            Span::styled("open overlay  ", Theme::keybind_desc()),
            Span::styled(" n/p ", Theme::keybind()),
            Span::styled("next/prev  ", Theme::keybind_desc()),
            Span::styled(" s ", Theme::keybind()),
            Span::styled("stop", Theme::keybind_desc()),
        ]));
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title_style = if self.state.now_playing.is_some() {
            Theme::playing()
        } else {
            Theme::dimmed()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" ▶ NOW PLAYING ", title_style));

        let para = Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(para, area);
    }
}
