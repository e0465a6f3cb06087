//! Application-level key bindings.
//!
//! - **Search**: `/` focuses the search box, `enter`/`esc` return to the
//!   content
//! - **Layout**: `v` toggles list and grid, `c` shows the controls panel
//! - **Data**: `s` cycles the title sort
//! - **Cards**: `enter`/`space` expand or collapse the selected card
//! - **Help and quit**: `?`, `q`, `ctrl+c`
//!
//! Which bindings are live depends on the focused area, and so does the
//! help footer: [`HelpKeys`] picks the bindings for the current focus.

use super::Focus;
use crate::controls::ControlsKeyMap;
use crate::help::KeyMap;
use crate::key;
use crate::search;
use crate::viewport::ViewportKeyMap;
use crossterm::event::KeyCode;

/// Bindings owned by the application itself.
#[derive(Debug, Clone)]
pub struct DemoKeyMap {
    /// Focus the search box.
    pub search: key::Binding,
    /// Leave the search box keeping the query.
    pub accept_search: key::Binding,
    /// Leave the focused panel.
    pub cancel: key::Binding,
    /// Show or hide the controls panel.
    pub toggle_controls: key::Binding,
    /// Cycle the title sort.
    pub sort: key::Binding,
    /// Switch between list and grid.
    pub toggle_view: key::Binding,
    /// Expand or collapse the selected card.
    pub expand: key::Binding,
    /// Open the full help.
    pub show_full_help: key::Binding,
    /// Close the full help.
    pub close_full_help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
    /// Quit from anywhere, including the search box.
    pub force_quit: key::Binding,
}

impl Default for DemoKeyMap {
    fn default() -> Self {
        Self {
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "done"),
            cancel: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "back"),
            toggle_controls: key::Binding::new(vec![KeyCode::Char('c')])
                .with_help("c", "controls"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            toggle_view: key::Binding::new(vec![KeyCode::Char('v')]).with_help("v", "list/grid"),
            expand: key::Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter/space", "expand"),
            show_full_help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            close_full_help: key::Binding::new(vec![KeyCode::Char('?')])
                .with_help("?", "close help"),
            quit: key::Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: key::Binding::new(vec!["ctrl+c"]).with_help("ctrl+c", "quit"),
        }
    }
}

/// Every binding in the application, viewed for one focus area.
pub struct HelpKeys<'a> {
    /// Application bindings.
    pub app: &'a DemoKeyMap,
    /// Content navigation.
    pub nav: &'a ViewportKeyMap,
    /// Controls panel.
    pub controls: &'a ControlsKeyMap,
    /// Search box editing.
    pub search: &'a search::KeyMap,
    /// Focused area.
    pub focus: Focus,
    /// Full help is open.
    pub show_all: bool,
}

impl HelpKeys<'_> {
    fn help_toggle(&self) -> &key::Binding {
        if self.show_all {
            &self.app.close_full_help
        } else {
            &self.app.show_full_help
        }
    }
}

impl KeyMap for HelpKeys<'_> {
    fn short_help(&self) -> Vec<&key::Binding> {
        let app = self.app;
        match self.focus {
            Focus::Content => vec![
                &self.nav.up,
                &self.nav.down,
                &app.expand,
                &app.search,
                &app.sort,
                &app.toggle_view,
                &app.toggle_controls,
                self.help_toggle(),
                &app.quit,
            ],
            Focus::Search => vec![&app.accept_search, &app.cancel, &self.search.clear, &app.force_quit],
            Focus::Controls => {
                let mut keys = self.controls.short_help();
                keys.extend([&app.cancel, self.help_toggle(), &app.quit]);
                keys
            }
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        let app = self.app;
        match self.focus {
            Focus::Content => {
                let mut columns = self.nav.full_help();
                columns.push(vec![&app.expand, &app.search, &app.sort, &app.toggle_view]);
                columns.push(vec![&app.toggle_controls, self.help_toggle(), &app.quit]);
                columns
            }
            Focus::Search => vec![
                vec![&app.accept_search, &app.cancel],
                vec![&self.search.clear, &app.force_quit],
            ],
            Focus::Controls => {
                let mut columns = self.controls.full_help();
                columns.push(vec![&app.cancel, self.help_toggle(), &app.quit]);
                columns
            }
        }
    }
}
