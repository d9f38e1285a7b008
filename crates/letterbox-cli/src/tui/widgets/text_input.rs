use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line editable field with a character limit.
///
/// The cursor is a char index, so multibyte input never splits a code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
    limit: usize,
    placeholder: &'static str,
}

impl TextInput {
    pub fn new(limit: usize, placeholder: &'static str) -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            limit,
            placeholder,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.chars = value.chars().take(self.limit).collect();
        self.cursor = self.chars.len();
        self
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Text before and after the cursor, for rendering.
    pub fn split_at_cursor(&self) -> (String, String) {
        let before = self.chars[..self.cursor].iter().collect();
        let after = self.chars[self.cursor..].iter().collect();
        (before, after)
    }

    /// Apply an editing key. Returns false for keys the field does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.chars.len(),
            _ => return false,
        }
        true
    }

    fn insert(&mut self, c: char) {
        if self.chars.len() >= self.limit {
            return;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }
}
