//! List panel
//!
//! Renders a provider's `ListView`: numbered rows with logo, title, tags,
//! favourite star and a marker on the entry that is playing. Empty views
//! show the provider's empty-state message.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::models::{ListView, Row};
use crate::ui::Theme;

/// Render state for one list panel
#[derive(Debug)]
pub struct ListPanel<'a> {
    pub view: &'a ListView,
    /// Selected visible row
    pub selected: usize,
    /// First visible row
    pub offset: usize,
    pub focused: bool,
    pub title: &'a str,
}

impl<'a> ListPanel<'a> {
    pub fn new(view: &'a ListView, title: &'a str) -> Self {
        Self {
            view,
            selected: 0,
            offset: 0,
            focused: true,
            title,
        }
    }

    pub fn selected(mut self, selected: usize, offset: usize) -> Self {
        self.selected = selected;
        self.offset = offset;
        self
    }

    fn block(&self, title: String) -> Block<'static> {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, Theme::title()))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.view.rows.is_empty() {
            let message = self.view.empty_message.unwrap_or("Nothing to show");
            let empty = Paragraph::new(message)
                .style(Theme::dimmed())
                .alignment(Alignment::Center)
                .block(self.block(format!(" {} ", self.title)));
            frame.render_widget(empty, area);
            return;
        }

        let visible_height = area.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .view
            .rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(visible_height)
            .map(|(i, row)| Self::render_row(row, i == self.selected))
            .collect();

        let title = format!(
            " {} ({}/{}) ",
            self.title,
            self.selected + 1,
            self.view.rows.len()
        );
        let list = List::new(items)
            .block(self.block(title))
            .style(Theme::text());
        frame.render_widget(list, area);
    }

    /// Format: ▸ ▶ 01 [M] Title   Torrent (Webtor)  [IFRAME] [TORRENT] ★
    fn render_row(row: &Row, is_selected: bool) -> ListItem<'static> {
        let marker = if is_selected { "▸ " } else { "  " };
        let playing = if row.active { "▶ " } else { "  " };

        let mut spans = vec![
            Span::styled(
                marker,
                if is_selected { Theme::accent() } else { Theme::dimmed() },
            ),
            Span::styled(playing, Theme::now_playing()),
            Span::styled(format!("{:02} ", row.number()), Theme::dimmed()),
            Span::styled(format!(" {} ", row.logo.glyph()), Theme::logo()),
            Span::raw(" "),
            Span::styled(
                row.title.clone(),
                if is_selected {
                    Theme::list_item_selected()
                } else {
                    Theme::list_item()
                },
            ),
            Span::raw("  "),
            Span::styled(row.subtitle.clone(), Theme::dimmed()),
        ];

        if !row.badge.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(row.badge.clone(), Theme::accent()));
        }
        for tag in &row.tags {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{}]", tag), Theme::tag(tag)));
        }
        if row.favorite {
            spans.push(Span::styled(" ★", Theme::favorite()));
        }

        ListItem::new(Line::from(spans))
    }
}
