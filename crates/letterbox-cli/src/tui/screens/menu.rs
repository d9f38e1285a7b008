use crossterm::event::{KeyCode, KeyEvent};

use super::{is_quit, move_selection};
use crate::tui::effect::{Effect, Feature};

/// The feature picker. Esc does nothing here; there is nowhere to go back to.
#[derive(Debug, Default)]
pub struct MenuScreen {
    selected: usize,
    help: bool,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn showing_help(&self) -> bool {
        self.help
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.help {
            return match key.code {
                KeyCode::Char('?') | KeyCode::Esc => {
                    self.help = false;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            };
        }

        if move_selection(&mut self.selected, Feature::ALL.len(), &key) {
            return Effect::None;
        }

        match key.code {
            KeyCode::Enter => Effect::Open(Feature::ALL[self.selected]),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.selected = index;
                Effect::Open(Feature::ALL[index])
            }
            KeyCode::Char('?') => {
                self.help = true;
                Effect::None
            }
            _ if is_quit(&key) => Effect::Quit,
            _ => Effect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{ch, key};

    #[test]
    fn test_enter_opens_selected_feature() {
        let mut menu = MenuScreen::new();
        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(ch('j'));
        assert_eq!(menu.handle_key(key(KeyCode::Enter)), Effect::Open(Feature::Diary));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut menu = MenuScreen::new();
        menu.handle_key(key(KeyCode::Up));
        assert_eq!(menu.selected(), 0);
        for _ in 0..10 {
            menu.handle_key(key(KeyCode::Down));
        }
        assert_eq!(menu.selected(), 4);
    }

    #[test]
    fn test_number_keys_quick_select() {
        let mut menu = MenuScreen::new();
        assert_eq!(menu.handle_key(ch('5')), Effect::Open(Feature::Lists));
        assert_eq!(menu.handle_key(ch('2')), Effect::Open(Feature::UserProfile));
        assert_eq!(menu.handle_key(ch('6')), Effect::None);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut menu = MenuScreen::new();
        menu.handle_key(ch('?'));
        assert!(menu.showing_help());

        assert_eq!(menu.handle_key(key(KeyCode::Enter)), Effect::None);
        assert_eq!(menu.handle_key(ch('1')), Effect::None);
        menu.handle_key(key(KeyCode::Esc));
        assert!(!menu.showing_help());

        menu.handle_key(ch('?'));
        menu.handle_key(ch('?'));
        assert!(!menu.showing_help());
    }

    #[test]
    fn test_esc_does_nothing_and_q_quits() {
        let mut menu = MenuScreen::new();
        assert_eq!(menu.handle_key(key(KeyCode::Esc)), Effect::None);
        assert_eq!(menu.handle_key(ch('q')), Effect::Quit);
    }
}
