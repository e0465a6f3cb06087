//! Slider panel for the live settings.

use crate::card;
use crate::config::{self, Bounds, Settings};
use crate::help::KeyMap;
use crate::key;
use crate::text;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// A setting adjustable from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Number of generated items.
    Count,
    /// Items rendered beyond the viewport edges.
    Overscan,
    /// Row estimate for unmeasured list cards.
    ItemHeight,
}

impl Setting {
    /// Panel order.
    pub const ALL: [Setting; 3] = [Setting::Count, Setting::Overscan, Setting::ItemHeight];

    /// Range and step of the setting.
    pub fn bounds(self) -> Bounds {
        match self {
            Setting::Count => config::COUNT,
            Setting::Overscan => config::OVERSCAN,
            Setting::ItemHeight => config::ITEM_HEIGHT,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Setting::ItemHeight => " rows",
            _ => "",
        }
    }
}

/// Panel bindings.
#[derive(Debug, Clone)]
pub struct ControlsKeyMap {
    /// Previous slider.
    pub prev: key::Binding,
    /// Next slider.
    pub next: key::Binding,
    /// One step down.
    pub decrement: key::Binding,
    /// One step up.
    pub increment: key::Binding,
    /// Ten steps down.
    pub decrement_fast: key::Binding,
    /// Ten steps up.
    pub increment_fast: key::Binding,
}

impl Default for ControlsKeyMap {
    fn default() -> Self {
        Self {
            prev: key::Binding::new(vec!["up", "k", "shift+tab"]).with_help("↑/k", "prev"),
            next: key::Binding::new(vec!["down", "j", "tab"]).with_help("↓/j", "next"),
            decrement: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('-')])
                .with_help("←/h", "decrease"),
            increment: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::Char('+')])
                .with_help("→/l", "increase"),
            decrement_fast: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char('H')])
                .with_help("H/pgdn", "decrease ×10"),
            increment_fast: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('L')])
                .with_help("L/pgup", "increase ×10"),
        }
    }
}

impl KeyMap for ControlsKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev, &self.next, &self.decrement, &self.increment]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.prev, &self.next],
            vec![&self.decrement, &self.increment],
            vec![&self.decrement_fast, &self.increment_fast],
        ]
    }
}

/// Panel styles.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Panel border.
    pub border: Style,
    /// Label of an idle slider.
    pub label: Style,
    /// Label of the selected slider.
    pub label_selected: Style,
    /// Filled part of the track.
    pub filled: Style,
    /// Empty part of the track.
    pub empty: Style,
    /// Value text.
    pub value: Style,
    /// Explanation line.
    pub description: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            border: Style::new().foreground(AdaptiveColor {
                Light: "#E2E8F0",
                Dark: "#475569",
            }),
            label: Style::new().foreground(AdaptiveColor {
                Light: "#334155",
                Dark: "#CBD5E1",
            }),
            label_selected: Style::new().bold(true).foreground(Color::from("#3B82F6")),
            filled: Style::new().foreground(Color::from("#3B82F6")),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#E2E8F0",
                Dark: "#334155",
            }),
            value: Style::new().bold(true),
            description: Style::new().italic(true).foreground(AdaptiveColor {
                Light: "#64748B",
                Dark: "#94A3B8",
            }),
        }
    }
}

const LABEL_WIDTH: usize = 13;
const VALUE_WIDTH: usize = 11;

/// Slider panel state.
#[derive(Debug, Clone)]
pub struct Controls {
    values: [usize; 3],
    selected: usize,
    focus: bool,
    /// Panel width in columns, border included.
    pub width: usize,
    /// Bindings.
    pub keymap: ControlsKeyMap,
    /// Styles.
    pub styles: Styles,
}

impl Controls {
    /// Panel initialized from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            values: [settings.count, settings.overscan, settings.item_height],
            selected: 0,
            focus: false,
            width: 80,
            keymap: ControlsKeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Current value of a setting.
    pub fn value(&self, setting: Setting) -> usize {
        self.values[Self::slot(setting)]
    }

    /// Sets a value, clamped into its bounds.
    pub fn set_value(&mut self, setting: Setting, value: usize) {
        let b = setting.bounds();
        self.values[Self::slot(setting)] = value.clamp(b.min, b.max);
    }

    /// The selected slider.
    pub fn selected(&self) -> Setting {
        Setting::ALL[self.selected]
    }

    /// Selects the next slider, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Setting::ALL.len();
    }

    /// Selects the previous slider, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Setting::ALL.len() - 1) % Setting::ALL.len();
    }

    /// Moves the selected slider by `steps`. Returns the new value when it
    /// changed.
    pub fn adjust(&mut self, steps: isize) -> Option<(Setting, usize)> {
        let setting = self.selected();
        let old = self.value(setting);
        let new = setting.bounds().offset(old, steps);
        if new == old {
            return None;
        }
        self.values[self.selected] = new;
        tracing::debug!(?setting, old, new, "setting adjusted");
        Some((setting, new))
    }

    /// One step up.
    pub fn increment(&mut self) -> Option<(Setting, usize)> {
        self.adjust(1)
    }

    /// One step down.
    pub fn decrement(&mut self) -> Option<(Setting, usize)> {
        self.adjust(-1)
    }

    /// Handles a key while focused. Returns a changed setting, if any.
    pub fn update(&mut self, msg: &KeyMsg) -> Option<(Setting, usize)> {
        if !self.focus {
            return None;
        }
        let km = &self.keymap;
        if km.prev.matches(msg) {
            self.select_prev();
            None
        } else if km.next.matches(msg) {
            self.select_next();
            None
        } else if km.decrement.matches(msg) {
            self.decrement()
        } else if km.increment.matches(msg) {
            self.increment()
        } else if km.decrement_fast.matches(msg) {
            self.adjust(-10)
        } else if km.increment_fast.matches(msg) {
            self.adjust(10)
        } else {
            None
        }
    }

    /// Panel height in rows, border included.
    pub fn height(&self) -> usize {
        // border, three sliders, blank, description, border
        Setting::ALL.len() + 4
    }

    /// Renders the bordered panel.
    pub fn view(&self) -> String {
        let inner = self.width.saturating_sub(4).max(LABEL_WIDTH + VALUE_WIDTH + 6);
        let mut lines: Vec<String> = Setting::ALL
            .iter()
            .enumerate()
            .map(|(i, &setting)| self.slider_line(setting, i == self.selected, inner))
            .collect();
        lines.push(" ".repeat(inner));

        let description = format!(
            "Only the items in view plus {} overscan are rendered, out of {}.",
            self.value(Setting::Overscan),
            text::thousands(self.value(Setting::Count))
        );
        lines.push(
            self.styles
                .description
                .clone()
                .inline(true)
                .render(&text::pad_right(&description, inner)),
        );
        card::frame(lines, inner, &self.styles.border).join("\n")
    }

    fn slider_line(&self, setting: Setting, selected: bool, inner: usize) -> String {
        let bounds = setting.bounds();
        let value = self.value(setting);
        let marker = if selected && self.focus { "▸ " } else { "  " };
        let label_style = if selected {
            &self.styles.label_selected
        } else {
            &self.styles.label
        };
        let label = label_style
            .clone()
            .inline(true)
            .render(&text::pad_right(bounds.name, LABEL_WIDTH - 2));

        let track = inner - LABEL_WIDTH - VALUE_WIDTH - 2;
        let span = (bounds.max - bounds.min).max(1);
        let filled = (value - bounds.min) * track / span;
        let bar = format!(
            "{}{}",
            self.styles.filled.clone().inline(true).render(&"━".repeat(filled)),
            self.styles
                .empty
                .clone()
                .inline(true)
                .render(&"─".repeat(track - filled))
        );

        let shown = format!("{}{}", text::thousands(value), setting.unit());
        let value_cell = self
            .styles
            .value
            .clone()
            .inline(true)
            .render(&format!("{:>width$}", shown, width = VALUE_WIDTH));
        format!("{}{} {} {}", marker, label, bar, value_cell)
    }

    fn slot(setting: Setting) -> usize {
        match setting {
            Setting::Count => 0,
            Setting::Overscan => 1,
            Setting::ItemHeight => 2,
        }
    }
}

impl Component for Controls {
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
