//! Single-line search box.
//!
//! A trimmed-down text input: insertion, deletion, cursor movement and a
//! placeholder. Horizontal scrolling keeps the cursor visible when the
//! query is longer than the box.

use crate::key;
use crate::text;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Placeholder shown while the query is empty.
pub const PLACEHOLDER: &str = "Search items...";

/// Editing bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Cursor one character left.
    pub character_backward: key::Binding,
    /// Cursor one character right.
    pub character_forward: key::Binding,
    /// Cursor to the start.
    pub line_start: key::Binding,
    /// Cursor to the end.
    pub line_end: key::Binding,
    /// Delete before the cursor.
    pub delete_character_backward: key::Binding,
    /// Delete under the cursor.
    pub delete_character_forward: key::Binding,
    /// Clear the whole query.
    pub clear: key::Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            character_backward: key::Binding::new(vec!["left", "ctrl+b"]),
            character_forward: key::Binding::new(vec!["right", "ctrl+f"]),
            line_start: key::Binding::new(vec!["home", "ctrl+a"]),
            line_end: key::Binding::new(vec!["end", "ctrl+e"]),
            delete_character_backward: key::Binding::new(vec!["backspace", "ctrl+h"]),
            delete_character_forward: key::Binding::new(vec!["delete", "ctrl+d"]),
            clear: key::Binding::new(vec!["ctrl+u"]).with_help("ctrl+u", "clear"),
        }
    }
}

/// Search box styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Prompt in front of the query.
    pub prompt: Style,
    /// Query text.
    pub text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// Character under the cursor.
    pub cursor: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            prompt: Style::new().foreground(Color::from("#3B82F6")),
            text: Style::new(),
            placeholder: Style::new().foreground(AdaptiveColor {
                Light: "#94A3B8",
                Dark: "#64748B",
            }),
            cursor: Style::new().reverse(true),
        }
    }
}

/// Search box state.
#[derive(Debug, Clone)]
pub struct SearchInput {
    value: Vec<char>,
    pos: usize,
    offset: usize,
    focus: bool,
    /// Prompt in front of the query.
    pub prompt: String,
    /// Placeholder while empty.
    pub placeholder: String,
    /// Total width in columns, prompt included.
    pub width: usize,
    /// Bindings.
    pub keymap: KeyMap,
    /// Styles.
    pub styles: Styles,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchInput {
    /// An empty, blurred search box.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            offset: 0,
            focus: false,
            prompt: "/ ".to_string(),
            placeholder: PLACEHOLDER.to_string(),
            width: 40,
            keymap: KeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Current query.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the query and moves the cursor to its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.pos = self.value.len();
        self.scroll_to_cursor();
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Inserts `c` at the cursor.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.pos, c);
        self.pos += 1;
        self.scroll_to_cursor();
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            self.value.remove(self.pos);
            self.scroll_to_cursor();
        }
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
        }
    }

    /// Cursor one character left.
    pub fn left(&mut self) {
        self.pos = self.pos.saturating_sub(1);
        self.scroll_to_cursor();
    }

    /// Cursor one character right.
    pub fn right(&mut self) {
        self.pos = (self.pos + 1).min(self.value.len());
        self.scroll_to_cursor();
    }

    /// Cursor to the start.
    pub fn home(&mut self) {
        self.pos = 0;
        self.scroll_to_cursor();
    }

    /// Cursor to the end.
    pub fn end(&mut self) {
        self.pos = self.value.len();
        self.scroll_to_cursor();
    }

    /// Empties the query.
    pub fn clear(&mut self) {
        self.value.clear();
        self.pos = 0;
        self.offset = 0;
    }

    /// Applies an editing key. Returns true when the query changed.
    ///
    /// Keys are ignored while blurred.
    pub fn update(&mut self, msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        let before = self.value.clone();
        let km = &self.keymap;
        if km.delete_character_backward.matches(msg) {
            self.backspace();
        } else if km.delete_character_forward.matches(msg) {
            self.delete();
        } else if km.clear.matches(msg) {
            self.clear();
        } else if km.character_backward.matches(msg) {
            self.left();
        } else if km.character_forward.matches(msg) {
            self.right();
        } else if km.line_start.matches(msg) {
            self.home();
        } else if km.line_end.matches(msg) {
            self.end();
        } else if let KeyCode::Char(c) = msg.key {
            if (msg.modifiers - KeyModifiers::SHIFT).is_empty() {
                self.insert(c);
            }
        }
        before != self.value
    }

    fn text_width(&self) -> usize {
        self.width.saturating_sub(text::width(&self.prompt)).max(1)
    }

    /// Adjusts the horizontal offset so the cursor cell is visible.
    fn scroll_to_cursor(&mut self) {
        let avail = self.text_width();
        if self.pos < self.offset {
            self.offset = self.pos;
            return;
        }
        // Leave one column for the cursor at the end.
        while self.columns(self.offset, self.pos) + 1 > avail && self.offset < self.pos {
            self.offset += 1;
        }
    }

    fn columns(&self, from: usize, to: usize) -> usize {
        self.value[from..to]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Renders prompt and query, padded to `width` columns.
    pub fn view(&self) -> String {
        let avail = self.text_width();
        let prompt = self.styles.prompt.clone().inline(true).render(&self.prompt);

        if self.value.is_empty() {
            let placeholder = text::pad_right(&self.placeholder, avail);
            let body = if self.focus {
                let mut chars = placeholder.chars();
                let first = chars.next().map(String::from).unwrap_or_default();
                let rest: String = chars.collect();
                format!(
                    "{}{}",
                    self.styles.cursor.clone().inline(true).render(&first),
                    self.styles.placeholder.clone().inline(true).render(&rest)
                )
            } else {
                self.styles.placeholder.clone().inline(true).render(&placeholder)
            };
            return format!("{}{}", prompt, body);
        }

        let mut used = 0;
        let mut visible = String::new();
        let mut cursor_cell = None;
        let mut after = String::new();
        for (i, &c) in self.value.iter().enumerate().skip(self.offset) {
            let w = c.width().unwrap_or(0);
            if used + w > avail {
                break;
            }
            used += w;
            if i < self.pos {
                visible.push(c);
            } else if i == self.pos && self.focus {
                cursor_cell = Some(c.to_string());
            } else {
                after.push(c);
            }
        }
        let at_end = self.pos >= self.value.len();
        if self.focus && at_end && used < avail {
            cursor_cell = Some(" ".to_string());
            used += 1;
        }

        let mut out = prompt;
        out.push_str(&self.styles.text.clone().inline(true).render(&visible));
        if let Some(cell) = cursor_cell {
            out.push_str(&self.styles.cursor.clone().inline(true).render(&cell));
        }
        out.push_str(&self.styles.text.clone().inline(true).render(&after));
        out.push_str(&" ".repeat(avail.saturating_sub(used)));
        out
    }
}

impl Component for SearchInput {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
