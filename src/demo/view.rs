//! Layout and rendering of the application screen.
//!
//! ```text
//! header (title, subtitle)
//! controls panel             only while shown
//! search | sort | list/grid
//! status line
//! content                    fills the remaining rows
//! help footer
//! ```

use super::{Demo, HelpKeys};
use crate::catalog::SortDirection;
use crate::config::ViewMode;
use crate::text;
use lipgloss_extras::prelude::*;

const TITLE: &str = "Virtual Scrolling Demo";
const SUBTITLE: &str = "Efficiently rendering thousands of items with virtualization";
const HEADER_HEIGHT: usize = 2;
const TOOLBAR_HEIGHT: usize = 1;
const STATUS_HEIGHT: usize = 1;
const SORT_WIDTH: usize = 12;
const TOGGLE_WIDTH: usize = 12;

/// Columns of the toolbar taken by the sort indicator and view toggle.
pub(super) const TOOLBAR_RESERVED: usize = 2 + SORT_WIDTH + 2 + TOGGLE_WIDTH;

/// Screen styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Title line.
    pub title: Style,
    /// Subtitle line.
    pub subtitle: Style,
    /// Sort indicator.
    pub sort: Style,
    /// Active view toggle segment.
    pub toggle_active: Style,
    /// Inactive view toggle segment.
    pub toggle_inactive: Style,
    /// Status line.
    pub status: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            title: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1E293B",
                Dark: "#F1F5F9",
            }),
            subtitle: Style::new().foreground(AdaptiveColor {
                Light: "#64748B",
                Dark: "#94A3B8",
            }),
            sort: Style::new().foreground(AdaptiveColor {
                Light: "#334155",
                Dark: "#CBD5E1",
            }),
            toggle_active: Style::new()
                .bold(true)
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#3B82F6")),
            toggle_inactive: Style::new().foreground(AdaptiveColor {
                Light: "#475569",
                Dark: "#94A3B8",
            }),
            status: Style::new().foreground(AdaptiveColor {
                Light: "#475569",
                Dark: "#94A3B8",
            }),
        }
    }
}

/// Sort indicator text.
pub fn sort_label(sort: Option<SortDirection>) -> &'static str {
    match sort {
        None => "Sort: none",
        Some(SortDirection::Asc) => "Sort: A→Z",
        Some(SortDirection::Desc) => "Sort: Z→A",
    }
}

/// Status line text for `matches` items of which `rendered` are drawn.
pub fn status_text(matches: usize, rendered: usize) -> String {
    if matches == 0 {
        return "No items found".to_string();
    }
    format!(
        "Showing {} items (only rendering {} in view)",
        text::thousands(matches),
        rendered
    )
}

impl Demo {
    /// Bindings shown in the footer for the current focus and view.
    pub fn help_keys(&self) -> HelpKeys<'_> {
        let nav = match self.view_mode {
            ViewMode::List => &self.list.viewport.keymap,
            ViewMode::Grid => &self.grid.viewport.keymap,
        };
        HelpKeys {
            app: &self.keys,
            nav,
            controls: &self.controls.keymap,
            search: &self.search.keymap,
            focus: self.focus,
            show_all: self.help.show_all,
        }
    }

    /// Rows left for the content after every other section.
    pub(super) fn content_height(&self) -> usize {
        let controls = if self.show_controls {
            self.controls.height()
        } else {
            0
        };
        let footer = self.help.height(&self.help_keys());
        self.height
            .saturating_sub(HEADER_HEIGHT + controls + TOOLBAR_HEIGHT + STATUS_HEIGHT + footer)
            .max(1)
    }

    /// Status line text.
    pub fn status_line(&self) -> String {
        status_text(self.filtered.len(), self.rendered_count())
    }

    fn header_view(&self) -> String {
        format!(
            "{}\n{}",
            self.styles
                .title
                .clone()
                .inline(true)
                .render(&text::truncate(TITLE, self.width)),
            self.styles
                .subtitle
                .clone()
                .inline(true)
                .render(&text::truncate(SUBTITLE, self.width))
        )
    }

    fn toolbar_view(&self) -> String {
        let sort = self
            .styles
            .sort
            .clone()
            .inline(true)
            .render(&text::pad_right(sort_label(self.sort), SORT_WIDTH));
        let segment = |label: &str, active: bool| {
            let style = if active {
                &self.styles.toggle_active
            } else {
                &self.styles.toggle_inactive
            };
            style
                .clone()
                .inline(true)
                .render(&format!(" {:<4} ", label))
        };
        let toggle = format!(
            "{}{}",
            segment("List", self.view_mode == ViewMode::List),
            segment("Grid", self.view_mode == ViewMode::Grid)
        );
        format!("{}  {}  {}", self.search.view(), sort, toggle)
    }

    fn content_view(&self) -> String {
        match self.view_mode {
            ViewMode::List => self.list.view(),
            ViewMode::Grid => self.grid.view(),
        }
    }

    /// The whole screen.
    pub(super) fn render(&self) -> String {
        let mut sections = vec![self.header_view()];
        if self.show_controls {
            sections.push(self.controls.view());
        }
        sections.push(self.toolbar_view());
        sections.push(
            self.styles
                .status
                .clone()
                .inline(true)
                .render(&text::truncate(&self.status_line(), self.width)),
        );
        sections.push(self.content_view());
        let footer = self.help.view(&self.help_keys());
        if !footer.is_empty() {
            sections.push(footer);
        }
        sections.join("\n")
    }
}
