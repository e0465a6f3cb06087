//! Key binding help footer.
//!
//! [`Model`] renders either a single compact line of the most important
//! bindings or a multi-column table of every binding, depending on
//! [`Model::show_all`]. Anything that exposes bindings implements
//! [`KeyMap`]; the demo's key map changes its answer with the focused area
//! so the footer always describes the keys that currently do something.
//!
//! Both layouts respect [`Model::width`]: entries that would not fit are
//! dropped and replaced by a trailing `…` when there is room for it.

use crate::key;
use crate::text;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

const ENTRY_SEPARATOR: &str = " • ";
const COLUMN_GAP: &str = "    ";

/// Source of bindings for the help view.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&key::Binding>;
    /// Binding columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&key::Binding>>;
}

/// Styles for the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Key labels.
    pub key: Style,
    /// Binding descriptions.
    pub desc: Style,
    /// Separators and the overflow marker.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let slate = |light: &'static str, dark: &'static str| {
            Style::new().foreground(AdaptiveColor {
                Light: light,
                Dark: dark,
            })
        };
        Self {
            key: slate("#64748B", "#94A3B8"),
            desc: slate("#94A3B8", "#64748B"),
            separator: slate("#CBD5E1", "#334155"),
        }
    }
}

/// Help view state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Render the full multi-column help instead of the short line.
    pub show_all: bool,
    /// Maximum width; `0` means unlimited.
    pub width: usize,
    /// Styles.
    pub styles: Styles,
}

impl Model {
    /// Creates a help view with default styles and unlimited width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style width setter.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders help for the given key map.
    pub fn view<K: KeyMap + ?Sized>(&self, keymap: &K) -> String {
        if self.show_all {
            self.columns_view(keymap.full_help())
        } else {
            self.line_view(keymap.short_help())
        }
    }

    /// Number of terminal lines [`view`](Self::view) will occupy.
    pub fn height<K: KeyMap + ?Sized>(&self, keymap: &K) -> usize {
        let view = self.view(keymap);
        if view.is_empty() {
            0
        } else {
            view.lines().count()
        }
    }

    fn entry(&self, binding: &key::Binding) -> String {
        let help = binding.help();
        format!(
            "{} {}",
            self.styles.key.clone().inline(true).render(&help.key),
            self.styles.desc.clone().inline(true).render(&help.desc)
        )
    }

    fn styled_separator(&self, s: &str) -> String {
        self.styles.separator.clone().inline(true).render(s)
    }

    fn overflows(&self, cols: usize) -> bool {
        self.width > 0 && cols > self.width
    }

    /// The overflow marker for a layout already `used` columns wide, empty
    /// when even the marker does not fit.
    fn overflow_marker(&self, used: usize) -> String {
        let marker = format!(" {}", text::ELLIPSIS);
        if self.overflows(used + text::width(&marker)) {
            String::new()
        } else {
            self.styled_separator(&marker)
        }
    }

    fn line_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styled_separator(ENTRY_SEPARATOR);
        let mut out = String::new();
        let mut used = 0;

        for (i, binding) in bindings.into_iter().filter(|b| b.enabled()).enumerate() {
            let entry = if i == 0 {
                self.entry(binding)
            } else {
                format!("{}{}", separator, self.entry(binding))
            };
            let cols = lipgloss::width_visible(&entry);
            if self.overflows(used + cols) {
                out.push_str(&self.overflow_marker(used));
                break;
            }
            used += cols;
            out.push_str(&entry);
        }
        out
    }

    fn columns_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let gap = self.styled_separator(COLUMN_GAP);
        let gap_cols = text::width(COLUMN_GAP);
        let mut parts: Vec<String> = Vec::new();
        let mut used = 0;

        for group in groups.iter().filter(|g| has_enabled(g)) {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| self.entry(b))
                .collect();
            let widest = rows
                .iter()
                .map(|r| lipgloss::width_visible(r))
                .max()
                .unwrap_or(0);
            let cols = if parts.is_empty() { widest } else { widest + gap_cols };
            if self.overflows(used + cols) {
                let marker = self.overflow_marker(used);
                if !marker.is_empty() {
                    parts.push(marker);
                }
                break;
            }
            if !parts.is_empty() {
                parts.push(gap.clone());
            }
            used += cols;
            parts.push(rows.join("\n"));
        }

        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }
}

fn has_enabled(bindings: &[&key::Binding]) -> bool {
    bindings.iter().any(|b| b.enabled())
}
