//! One state machine per feature. Screens never talk to each other: they
//! mutate themselves and hand an [`Effect`](super::effect::Effect) upward.

pub mod diary;
pub mod lists;
pub mod menu;
pub mod profile;
pub mod search;
pub mod watchlist;

pub use diary::DiaryScreen;
pub use lists::ListsScreen;
pub use menu::MenuScreen;
pub use profile::ProfileScreen;
pub use search::SearchScreen;
pub use watchlist::WatchlistScreen;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use letterbox_runtime::Payload;

pub(crate) const QUERY_LIMIT: usize = 64;
pub(crate) const USERNAME_LIMIT: usize = 32;

/// Plain `q`, only honoured outside text entry.
pub(crate) fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q') && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Up/down (or k/j) over a table of `len` rows. Returns true if the key was a
/// movement key.
pub(crate) fn move_selection(selected: &mut usize, len: usize, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.saturating_sub(1);
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *selected + 1 < len {
                *selected += 1;
            }
            true
        }
        KeyCode::Home => {
            *selected = 0;
            true
        }
        KeyCode::End => {
            *selected = len.saturating_sub(1);
            true
        }
        _ => false,
    }
}

pub(crate) fn unexpected_payload(expected: &str, got: &Payload) -> String {
    format!("expected {} but the scraper returned {}", expected, got.kind())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::effect::{Effect, RequestIds};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    /// Type `text` into whatever handles keys, discarding effects.
    pub fn type_text(
        mut handle: impl FnMut(KeyEvent, &mut RequestIds) -> Effect,
        ids: &mut RequestIds,
        text: &str,
    ) {
        for c in text.chars() {
            assert_eq!(handle(ch(c), ids), Effect::None);
        }
    }
}
