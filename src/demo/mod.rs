//! The demo application: one bubbletea model tying the views together.
//!
//! [`Demo`] owns the catalog, the filtered index list and both content
//! views. Only the view matching the current [`ViewMode`] is drawn, but
//! both are kept in sync with the data so switching is instant.

mod keys;
mod view;

pub use keys::{DemoKeyMap, HelpKeys};
pub use view::Styles;

use crate::catalog::{self, Catalog, SortDirection};
use crate::config::{self, Settings, ViewMode};
use crate::controls::{Controls, Setting};
use crate::data;
use crate::grid_view::GridView;
use crate::help;
use crate::list_view::ListView;
use crate::search::SearchInput;
use crate::viewport::Navigation;
use crate::Component;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};

const FALLBACK_SIZE: (usize, usize) = (80, 24);

/// Area receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The list or grid.
    Content,
    /// The search box.
    Search,
    /// The controls panel.
    Controls,
}

/// Application state.
#[derive(Debug)]
pub struct Demo {
    settings: Settings,
    catalog: Catalog,
    filtered: Vec<usize>,
    search: SearchInput,
    sort: Option<SortDirection>,
    view_mode: ViewMode,
    show_controls: bool,
    focus: Focus,
    controls: Controls,
    list: ListView,
    grid: GridView,
    help: help::Model,
    keys: DemoKeyMap,
    styles: Styles,
    width: usize,
    height: usize,
}

impl Demo {
    /// Builds the application for a terminal of `width` x `height`.
    pub fn new(settings: Settings, width: usize, height: usize) -> Self {
        let catalog = Catalog::new(data::generate_items(settings.count, settings.seed));
        let filtered = catalog.query("", None);
        let mut demo = Self {
            list: ListView::new(settings.item_height, settings.overscan, settings.seed),
            grid: GridView::new(settings.overscan, settings.seed),
            controls: Controls::new(&settings),
            view_mode: settings.view,
            settings,
            catalog,
            filtered,
            search: SearchInput::new(),
            sort: None,
            show_controls: false,
            focus: Focus::Content,
            help: help::Model::new(),
            keys: DemoKeyMap::default(),
            styles: Styles::default(),
            width,
            height,
        };
        demo.relayout();
        demo.list.set_items(&demo.catalog, demo.filtered.clone());
        demo.grid.set_items(&demo.catalog, demo.filtered.clone());
        tracing::info!(
            count = demo.settings.count,
            overscan = demo.settings.overscan,
            view = ?demo.view_mode,
            width,
            height,
            "demo started"
        );
        demo
    }

    /// Settings currently in effect, including slider changes.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current layout.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Area receiving keys.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Current sort.
    pub fn sort(&self) -> Option<SortDirection> {
        self.sort
    }

    /// Current search query.
    pub fn query(&self) -> String {
        self.search.value()
    }

    /// True while the controls panel is shown.
    pub fn controls_visible(&self) -> bool {
        self.show_controls
    }

    /// All generated items.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog indices matching the search, in display order.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// The list view.
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// The grid view.
    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    /// Cards rendered by the live view, overscan included.
    pub fn rendered_count(&self) -> usize {
        match self.view_mode {
            ViewMode::List => self.list.rendered_count(),
            ViewMode::Grid => self.grid.rendered_count(),
        }
    }

    /// Handles a terminal resize.
    pub fn set_size(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        tracing::debug!(width, height, "terminal resized");
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Handles one key press. Returns a command when the app should quit.
    pub fn handle_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        if self.keys.force_quit.matches(msg) {
            return Some(quit());
        }
        match self.focus {
            Focus::Search => self.handle_search_key(msg),
            Focus::Controls => self.handle_controls_key(msg),
            Focus::Content => self.handle_content_key(msg),
        }
    }

    fn handle_search_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        if self.keys.accept_search.matches(msg) || self.keys.cancel.matches(msg) {
            self.set_focus(Focus::Content);
        } else if self.search.update(msg) {
            self.apply_filter();
        }
        None
    }

    fn handle_controls_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        let keys = &self.keys;
        if keys.quit.matches(msg) {
            return Some(quit());
        }
        if keys.cancel.matches(msg) {
            self.set_focus(Focus::Content);
        } else if keys.toggle_controls.matches(msg) {
            self.show_controls = false;
            self.set_focus(Focus::Content);
            self.relayout();
        } else if keys.show_full_help.matches(msg) {
            self.toggle_help();
        } else if let Some((setting, value)) = self.controls.update(msg) {
            self.apply_setting(setting, value);
        }
        None
    }

    fn handle_content_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        let keys = &self.keys;
        if keys.quit.matches(msg) {
            return Some(quit());
        }
        if keys.search.matches(msg) {
            self.set_focus(Focus::Search);
        } else if keys.cancel.matches(msg) {
            if !self.search.value().is_empty() {
                self.search.clear();
                self.apply_filter();
            }
        } else if keys.toggle_controls.matches(msg) {
            // A panel left with Esc is still shown; `c` returns to it.
            self.show_controls = true;
            self.set_focus(Focus::Controls);
        } else if keys.sort.matches(msg) {
            self.sort = catalog::next_sort(self.sort);
            self.apply_filter();
        } else if keys.toggle_view.matches(msg) {
            self.view_mode = self.view_mode.toggled();
            self.settings.view = self.view_mode;
            tracing::debug!(view = ?self.view_mode, "view toggled");
            self.relayout();
        } else if keys.expand.matches(msg) {
            match self.view_mode {
                ViewMode::List => self.list.toggle_expanded(&self.catalog),
                ViewMode::Grid => self.grid.toggle_expanded(&self.catalog),
            }
        } else if keys.show_full_help.matches(msg) {
            self.toggle_help();
        } else {
            self.navigate(msg);
        }
        None
    }

    fn navigate(&mut self, msg: &KeyMsg) {
        match self.view_mode {
            ViewMode::List => {
                if let Some(nav) = self.list.viewport.keymap.navigation(msg) {
                    self.list.navigate(&self.catalog, nav);
                }
            }
            ViewMode::Grid => {
                if let Some(nav) = self.grid.viewport.keymap.navigation(msg) {
                    self.grid.navigate(&self.catalog, nav);
                }
            }
        }
    }

    /// Moves the cursor of the live view.
    pub fn navigate_to(&mut self, nav: Navigation) {
        match self.view_mode {
            ViewMode::List => self.list.navigate(&self.catalog, nav),
            ViewMode::Grid => self.grid.navigate(&self.catalog, nav),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.search.blur();
        self.controls.blur();
        match focus {
            Focus::Search => {
                self.search.focus();
            }
            Focus::Controls => {
                self.controls.focus();
            }
            Focus::Content => {}
        }
        self.focus = focus;
        // Footer height depends on the focused area.
        self.relayout();
    }

    fn toggle_help(&mut self) {
        self.help.show_all = !self.help.show_all;
        self.relayout();
    }

    fn apply_setting(&mut self, setting: Setting, value: usize) {
        match setting {
            Setting::Count => {
                self.settings.count = value;
                self.catalog = Catalog::new(data::generate_items(value, self.settings.seed));
                tracing::debug!(count = value, "items regenerated");
                self.apply_filter();
            }
            Setting::Overscan => {
                self.settings.overscan = value;
                self.list.set_overscan(&self.catalog, value);
                self.grid.set_overscan(&self.catalog, value);
            }
            Setting::ItemHeight => {
                self.settings.item_height = value;
                self.list.set_item_height(&self.catalog, value);
            }
        }
    }

    /// Recomputes the filtered items and resets both views to the top.
    fn apply_filter(&mut self) {
        self.filtered = self.catalog.query(&self.search.value(), self.sort);
        self.list.set_items(&self.catalog, self.filtered.clone());
        self.grid.set_items(&self.catalog, self.filtered.clone());
    }

    /// Sizes every section and re-lays out both views.
    fn relayout(&mut self) {
        self.help.width = self.width;
        self.search.width = self.width.saturating_sub(view::TOOLBAR_RESERVED).max(12);
        self.controls.width = self.width;
        let content_height = self.content_height();
        self.list.set_size(&self.catalog, self.width, content_height);
        self.grid.set_size(&self.catalog, self.width, content_height);
    }
}

impl BubbleTeaModel for Demo {
    fn init() -> (Self, Option<Cmd>) {
        let settings = config::current();
        let (width, height) = crossterm::terminal::size()
            .map(|(w, h)| (w as usize, h as usize))
            .unwrap_or(FALLBACK_SIZE);
        (Self::new(settings, width, height), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        None
    }

    fn view(&self) -> String {
        self.render()
    }
}
