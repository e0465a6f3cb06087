//! Fixed-height window onto virtually laid-out content.
//!
//! The views never build their full content: they render only the blocks
//! in the virtualizer's range, each tagged with its start row. [`Model`]
//! places those blocks on a canvas of exactly `height` rows starting at
//! the scroll offset, blanking rows nothing covers, and draws a scrollbar
//! in the last column.
//!
//! ```rust
//! use virtual_scroll_demo::viewport::Model;
//!
//! let viewport = Model::new(6, 3);
//! let a = vec!["aaaaa".to_string(); 2];
//! let b = vec!["bbbbb".to_string(); 2];
//! let out = viewport.render([(0, a.as_slice()), (2, b.as_slice())], 1, 10);
//! let rows: Vec<&str> = out.lines().collect();
//! assert_eq!(rows.len(), 3);
//! assert!(rows[0].starts_with("aaaaa"));
//! assert!(rows[1].starts_with("bbbbb"));
//! ```

use crate::help::KeyMap;
use crate::key;
use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Cursor and scroll movements understood by the content views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Previous item or grid row.
    Up,
    /// Next item or grid row.
    Down,
    /// Previous grid column.
    Left,
    /// Next grid column.
    Right,
    /// One viewport up.
    PageUp,
    /// One viewport down.
    PageDown,
    /// Half a viewport up.
    HalfPageUp,
    /// Half a viewport down.
    HalfPageDown,
    /// First item.
    Top,
    /// Last item.
    Bottom,
}

/// Navigation bindings for the content area.
#[derive(Debug, Clone)]
pub struct ViewportKeyMap {
    /// Move up one item.
    pub up: key::Binding,
    /// Move down one item.
    pub down: key::Binding,
    /// Move left one column (grid only).
    pub left: key::Binding,
    /// Move right one column (grid only).
    pub right: key::Binding,
    /// Page up.
    pub page_up: key::Binding,
    /// Page down.
    pub page_down: key::Binding,
    /// Half page up.
    pub half_page_up: key::Binding,
    /// Half page down.
    pub half_page_down: key::Binding,
    /// Jump to the first item.
    pub top: key::Binding,
    /// Jump to the last item.
    pub bottom: key::Binding,
}

impl Default for ViewportKeyMap {
    fn default() -> Self {
        Self {
            up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            left: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "left"),
            right: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "right"),
            page_up: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('b')])
                .with_help("b/pgup", "page up"),
            page_down: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char('f')])
                .with_help("f/pgdn", "page down"),
            half_page_up: key::Binding::new(vec!["u", "ctrl+u"]).with_help("u", "½ page up"),
            half_page_down: key::Binding::new(vec!["d", "ctrl+d"]).with_help("d", "½ page down"),
            top: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "go to start"),
            bottom: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "go to end"),
        }
    }
}

impl ViewportKeyMap {
    /// The movement bound to `msg`, if any.
    pub fn navigation(&self, msg: &KeyMsg) -> Option<Navigation> {
        let table = [
            (&self.up, Navigation::Up),
            (&self.down, Navigation::Down),
            (&self.left, Navigation::Left),
            (&self.right, Navigation::Right),
            (&self.page_up, Navigation::PageUp),
            (&self.page_down, Navigation::PageDown),
            (&self.half_page_up, Navigation::HalfPageUp),
            (&self.half_page_down, Navigation::HalfPageDown),
            (&self.top, Navigation::Top),
            (&self.bottom, Navigation::Bottom),
        ];
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(msg))
            .map(|(_, nav)| nav)
    }

    /// Enables the column bindings only where columns exist.
    pub fn set_columns_enabled(&mut self, enabled: bool) {
        self.left.set_enabled(enabled);
        self.right.set_enabled(enabled);
    }
}

impl KeyMap for ViewportKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.page_down]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.left, &self.right],
            vec![&self.page_up, &self.page_down, &self.half_page_up, &self.half_page_down],
            vec![&self.top, &self.bottom],
        ]
    }
}

/// Scrollbar styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Track cells.
    pub track: Style,
    /// Thumb cells.
    pub thumb: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            track: Style::new().foreground(AdaptiveColor {
                Light: "#E2E8F0",
                Dark: "#334155",
            }),
            thumb: Style::new().foreground(AdaptiveColor {
                Light: "#64748B",
                Dark: "#94A3B8",
            }),
        }
    }
}

const TRACK: &str = "│";
const THUMB: &str = "┃";

/// A window of `width` x `height` cells.
#[derive(Debug, Clone)]
pub struct Model {
    /// Total width including the scrollbar column.
    pub width: usize,
    /// Number of rows shown.
    pub height: usize,
    /// Draw the scrollbar column.
    pub scrollbar: bool,
    /// Scrollbar styles.
    pub styles: Styles,
    /// Navigation bindings.
    pub keymap: ViewportKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Model {
    /// A window with a scrollbar.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scrollbar: true,
            styles: Styles::default(),
            keymap: ViewportKeyMap::default(),
        }
    }

    /// Resizes the window.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Columns available to content.
    pub fn content_width(&self) -> usize {
        if self.scrollbar {
            self.width.saturating_sub(1)
        } else {
            self.width
        }
    }

    /// Places `blocks` at their start rows and cuts `height` rows at
    /// `offset`.
    ///
    /// Block lines are expected to be [`content_width`](Self::content_width)
    /// columns wide; later blocks overwrite earlier ones where they overlap.
    /// `total` is the content height, used for the scrollbar.
    pub fn render<'a, I>(&self, blocks: I, offset: usize, total: usize) -> String
    where
        I: IntoIterator<Item = (usize, &'a [String])>,
    {
        let blank = " ".repeat(self.content_width());
        let mut rows: Vec<Option<&str>> = vec![None; self.height];
        let window = offset..offset + self.height;

        for (start, lines) in blocks {
            for (i, line) in lines.iter().enumerate() {
                let row = start + i;
                if window.contains(&row) {
                    rows[row - offset] = Some(line.as_str());
                }
            }
        }

        let bar = if self.scrollbar {
            self.scrollbar_cells(offset, total)
        } else {
            Vec::new()
        };
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut line = row.unwrap_or(&blank).to_string();
                if let Some(cell) = bar.get(i) {
                    line.push_str(cell);
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Thumb rows as `start..end` within the window, or `None` when all
    /// content fits.
    pub fn thumb(&self, offset: usize, total: usize) -> Option<std::ops::Range<usize>> {
        let height = self.height;
        if height == 0 || total <= height {
            return None;
        }
        let len = (height * height / total).clamp(1, height);
        let travel = height - len;
        let max_offset = total - height;
        let start = (offset.min(max_offset) * travel + max_offset / 2) / max_offset;
        Some(start..start + len)
    }

    fn scrollbar_cells(&self, offset: usize, total: usize) -> Vec<String> {
        let Some(thumb) = self.thumb(offset, total) else {
            return vec![" ".to_string(); self.height];
        };
        (0..self.height)
            .map(|row| {
                if thumb.contains(&row) {
                    self.styles.thumb.clone().inline(true).render(THUMB)
                } else {
                    self.styles.track.clone().inline(true).render(TRACK)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn lines(text: &str, n: usize) -> Vec<String> {
        vec![text.to_string(); n]
    }

    fn plain_rows(s: &str) -> Vec<String> {
        strip_ansi_escapes::strip_str(s)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_render_cuts_exact_height() {
        let vp = Model::new(5, 4);
        let a = lines("aaaa", 3);
        let b = lines("bbbb", 3);
        let out = vp.render([(0, a.as_slice()), (3, b.as_slice())], 2, 6);
        let rows = plain_rows(&out);
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][..4], "aaaa");
        assert_eq!(&rows[1][..4], "bbbb");
        assert_eq!(&rows[3][..4], "bbbb");
    }

    #[test]
    fn test_uncovered_rows_are_blank() {
        let vp = Model::new(5, 3);
        let a = lines("aaaa", 1);
        let out = vp.render([(0, a.as_slice())], 0, 1);
        let rows = plain_rows(&out);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "     ");
    }

    #[test]
    fn test_thumb_positions() {
        let vp = Model::new(5, 10);
        assert_eq!(vp.thumb(0, 5), None);
        assert_eq!(vp.thumb(0, 100), Some(0..1));
        assert_eq!(vp.thumb(90, 100), Some(9..10));
        assert_eq!(vp.thumb(0, 20), Some(0..5));
        assert_eq!(vp.thumb(10, 20), Some(5..10));
    }

    #[test]
    fn test_navigation_bindings() {
        let km = ViewportKeyMap::default();
        let msg = |code| KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(km.navigation(&msg(KeyCode::Char('j'))), Some(Navigation::Down));
        assert_eq!(km.navigation(&msg(KeyCode::PageUp)), Some(Navigation::PageUp));
        assert_eq!(km.navigation(&msg(KeyCode::Char('G'))), Some(Navigation::Bottom));
        assert_eq!(km.navigation(&msg(KeyCode::Char('x'))), None);
        let ctrl_d = KeyMsg {
            key: KeyCode::Char('d'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(km.navigation(&ctrl_d), Some(Navigation::HalfPageDown));
    }

    #[test]
    fn test_disabled_columns_do_not_match() {
        let mut km = ViewportKeyMap::default();
        km.set_columns_enabled(false);
        let msg = KeyMsg {
            key: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(km.navigation(&msg), None);
    }
}
