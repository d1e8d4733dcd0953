//! Text inputs: the search box and the add-torrent form

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{AddForm, InputMode, TextInput};
use crate::ui::Theme;

/// Field text with a cursor bar when focused
pub fn field_text(input: &TextInput, focused: bool) -> String {
    if !focused {
        return input.value.clone();
    }
    let split = input
        .value
        .char_indices()
        .nth(input.cursor)
        .map(|(i, _)| i)
        .unwrap_or(input.value.len());
    let (before, after) = input.value.split_at(split);
    format!("{}│{}", before, after)
}

/// Search box in the header
pub fn render_search(frame: &mut Frame, area: Rect, search: &TextInput, focused: bool) {
    let text = if focused {
        format!("⌕ {}", field_text(search, true))
    } else if search.value.is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", search.value)
    };

    let para = Paragraph::new(text)
        .style(if focused {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(para, area);
}

/// Centered popup with the title and source fields
pub fn render_add_form(frame: &mut Frame, area: Rect, form: &AddForm, mode: InputMode) {
    let width = 70.min(area.width.saturating_sub(4));
    let height = 8.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let label = |name: &'static str, focused: bool| {
        Span::styled(
            name,
            if focused { Theme::accent() } else { Theme::dimmed() },
        )
    };
    let title_focused = mode == InputMode::AddTitle;
    let src_focused = mode == InputMode::AddSource;

    let lines = vec![
        Line::from(vec![
            label("Title   ", title_focused),
            Span::styled(field_text(&form.title, title_focused), Theme::input()),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Source  ", src_focused),
            Span::styled(field_text(&form.src, src_focused), Theme::input()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" TAB ", Theme::keybind()),
            Span::styled("switch field  ", Theme::keybind_desc()),
            Span::styled(" ENTER ", Theme::keybind()),
            Span::styled("add  ", Theme::keybind_desc()),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("cancel", Theme::keybind_desc()),
        ]),
    ];

    let para = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::border_focused())
            .title(Span::styled(" 🧲 ADD TORRENT ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(para, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_text_cursor() {
        let input = TextInput {
            value: "abc".into(),
            cursor: 1,
        };
        assert_eq!(field_text(&input, true), "a│bc");
        assert_eq!(field_text(&input, false), "abc");
    }

    #[test]
    fn test_field_text_multibyte_cursor() {
        let input = TextInput {
            value: "été".into(),
            cursor: 2,
        };
        assert_eq!(field_text(&input, true), "ét│é");
    }
}
