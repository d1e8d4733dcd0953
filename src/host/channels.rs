//! Built-in channel list
//!
//! Channels come from the config file and play natively. Stations flagged as
//! radio also open the radio overlay.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ListError, ListProvider, PlayerState, RadioState};
use crate::models::{EmptyState, Entry, ListKind, ListView, Logo, NowPlaying, PlaybackMode, Row};

/// Channel definition from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Audio-only station
    #[serde(default)]
    pub radio: bool,
}

/// The player's own channel list
#[derive(Debug, Default)]
pub struct ChannelList {
    entries: Vec<Entry>,
    radio: Vec<bool>,
    current: Option<usize>,
}

impl ChannelList {
    pub fn from_config(channels: &[ChannelConfig]) -> Self {
        let entries = channels
            .iter()
            .enumerate()
            .map(|(i, ch)| Entry {
                id: format!("ch-{}", i + 1),
                name: ch.name.clone(),
                url: ch.url.clone(),
                logo: Some(
                    ch.logo
                        .clone()
                        .map(Logo::Image)
                        .unwrap_or_else(|| Logo::from_name(&ch.name)),
                ),
                group: ch.group.clone().unwrap_or_else(|| {
                    if ch.radio { "Radio" } else { "Live" }.to_string()
                }),
                is_iframe: false,
                is_favorite: false,
                webtor: false,
            })
            .collect();

        Self {
            entries,
            radio: channels.iter().map(|ch| ch.radio).collect(),
            current: None,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_radio(&self, index: usize) -> bool {
        self.radio.get(index).copied().unwrap_or(false)
    }
}

impl ListProvider for ChannelList {
    fn kind(&self) -> ListKind {
        ListKind::CHANNELS
    }

    fn label(&self) -> &str {
        "📺 Channels"
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn render(&self, state: &PlayerState) -> ListView {
        let rows: Vec<Row> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches_search(&state.search))
            .map(|(index, entry)| Row {
                index,
                id: entry.id.clone(),
                title: entry.display_name(),
                subtitle: entry.group.clone(),
                logo: entry.logo_or_derived(),
                badge: String::new(),
                tags: if self.is_radio(index) { vec!["RADIO"] } else { vec!["LIVE"] },
                favorite: entry.is_favorite,
                active: state.current_entry_id() == Some(entry.id.as_str()),
            })
            .collect();

        if !rows.is_empty() {
            ListView::with_rows(ListKind::CHANNELS, rows)
        } else if self.entries.is_empty() {
            ListView::empty(
                ListKind::CHANNELS,
                EmptyState::NoEntries,
                "No channels configured.",
            )
        } else {
            ListView::empty(ListKind::CHANNELS, EmptyState::NoMatches, "No results.")
        }
    }

    fn play(&mut self, index: usize, state: &mut PlayerState) -> Result<(), ListError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        if entry.url.trim().is_empty() {
            return Err(ListError::MissingSource(entry.id.clone()));
        }

        self.current = Some(index);
        let radio = self.is_radio(index);
        info!(channel = %entry.name, radio, "playing channel");

        state.set_active_list_kind(ListKind::CHANNELS);
        state.set_active_entry(entry.clone());
        state.mode = PlaybackMode::Native;
        state.stream_url = Some(entry.url.clone());
        state.iframe_src = None;
        state.now_playing = Some(NowPlaying {
            title: entry.display_name(),
            tag: if radio { "RADIO" } else { "LIVE" }.to_string(),
        });

        if radio {
            state.radio = RadioState {
                overlay_open: true,
                playing: true,
                entry_id: Some(entry.id.clone()),
            };
            state.set_status("Playing radio");
        } else {
            state.radio = RadioState::default();
            state.set_status("Playing channel");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> Vec<ChannelConfig> {
        vec![
            ChannelConfig {
                name: "Arte".into(),
                url: "https://tv.example/arte.m3u8".into(),
                logo: None,
                group: None,
                radio: false,
            },
            ChannelConfig {
                name: "FIP".into(),
                url: "https://radio.example/fip.mp3".into(),
                logo: Some("https://radio.example/fip.png".into()),
                group: None,
                radio: true,
            },
        ]
    }

    #[test]
    fn test_from_config() {
        let list = ChannelList::from_config(&channels());
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].id, "ch-1");
        assert_eq!(list.entries()[0].group, "Live");
        assert_eq!(list.entries()[1].group, "Radio");
        assert_eq!(
            list.entries()[1].logo,
            Some(Logo::Image("https://radio.example/fip.png".into()))
        );
    }

    #[test]
    fn test_play_native() {
        let mut list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();

        list.play(0, &mut state).unwrap();
        assert_eq!(state.active_list_kind(), Some(ListKind::CHANNELS));
        assert_eq!(state.mode, PlaybackMode::Native);
        assert_eq!(state.stream_url.as_deref(), Some("https://tv.example/arte.m3u8"));
        assert!(!state.radio.is_active());
    }

    #[test]
    fn test_play_radio_opens_overlay() {
        let mut list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();

        list.play(1, &mut state).unwrap();
        assert!(state.radio.playing);
        assert!(state.radio.overlay_open);
        assert_eq!(state.radio.entry_id.as_deref(), Some("ch-2"));
        assert_eq!(state.now_playing.unwrap().tag, "RADIO");
    }

    #[test]
    fn test_tv_channel_after_radio_resets_radio() {
        let mut list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();

        list.play(1, &mut state).unwrap();
        assert!(state.radio.is_active());

        list.play(0, &mut state).unwrap();
        assert_eq!(state.current_entry_id(), Some("ch-1"));
        assert_eq!(state.radio, RadioState::default());
    }

    #[test]
    fn test_play_out_of_range() {
        let mut list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();
        assert!(matches!(
            list.play(5, &mut state),
            Err(ListError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_render_filters_by_search() {
        let list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();
        state.search = "fip".into();

        let view = list.render(&state);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].index, 1);
        assert_eq!(view.rows[0].tags, vec!["RADIO"]);

        state.search = "nothing".into();
        assert_eq!(list.render(&state).empty, Some(EmptyState::NoMatches));
    }

    #[test]
    fn test_mutations_unsupported() {
        let mut list = ChannelList::from_config(&channels());
        let mut state = PlayerState::new();
        assert!(!list.accepts_additions());
        assert!(matches!(
            list.add_entry("x", "magnet:?x", &mut state),
            Err(ListError::Unsupported(_))
        ));
        assert!(matches!(
            list.remove_entry("ch-1", &mut state),
            Err(ListError::Unsupported(_))
        ));
    }
}
