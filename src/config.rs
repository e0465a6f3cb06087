//! Command-line configuration and validated demo settings.
//!
//! [`Cli`] is the raw `clap` surface. [`Settings`] is what the application
//! runs with: every value has been checked against the same ranges the
//! controls panel enforces, so the UI never has to deal with a count of 7
//! or an overscan of 900.

use crate::error::{Error, Result};
use clap::{Parser, ValueEnum};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

/// Inclusive bounds and step of an adjustable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Human readable name, used in errors and the controls panel.
    pub name: &'static str,
    /// Smallest allowed value.
    pub min: usize,
    /// Largest allowed value.
    pub max: usize,
    /// Increment between allowed values, counted from `min`.
    pub step: usize,
}

impl Bounds {
    /// Checks that `value` lies within the bounds and on a step.
    pub fn validate(&self, value: usize) -> Result<usize> {
        if value < self.min || value > self.max {
            return Err(Error::OutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        if (value - self.min) % self.step != 0 {
            return Err(Error::OffStep {
                name: self.name,
                value,
                step: self.step,
            });
        }
        Ok(value)
    }

    /// Moves `value` by `steps` increments, clamped to the bounds.
    pub fn offset(&self, value: usize, steps: isize) -> usize {
        let delta = steps.unsigned_abs() * self.step;
        let next = if steps < 0 {
            value.saturating_sub(delta)
        } else {
            value.saturating_add(delta)
        };
        next.clamp(self.min, self.max)
    }
}

/// Item count slider bounds.
pub const COUNT: Bounds = Bounds {
    name: "Item Count",
    min: 100,
    max: 50_000,
    step: 100,
};

/// Overscan slider bounds.
pub const OVERSCAN: Bounds = Bounds {
    name: "Overscan",
    min: 1,
    max: 50,
    step: 1,
};

/// Estimated item height slider bounds, in terminal rows.
pub const ITEM_HEIGHT: Bounds = Bounds {
    name: "Item Height",
    min: 3,
    max: 12,
    step: 1,
};

/// Which virtualized layout is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// One card per row.
    #[default]
    List,
    /// Responsive multi-column grid.
    Grid,
}

impl ViewMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "virtual-scroll-demo")]
#[command(about = "Scroll through tens of thousands of items while rendering only what is visible", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of generated items
    #[arg(long, default_value_t = 10_000)]
    pub count: usize,

    /// Items rendered beyond each edge of the viewport
    #[arg(long, default_value_t = 10)]
    pub overscan: usize,

    /// Estimated list item height in rows
    #[arg(long, default_value_t = 5)]
    pub item_height: usize,

    /// Seed for the fixture data generator
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Initial layout
    #[arg(long, value_enum, default_value_t = ViewMode::List)]
    pub view: ViewMode,

    /// Write logs to this file (logging is disabled without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], default_value = "info")]
    pub log_level: String,
}

/// Validated settings the demo starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Number of generated items.
    pub count: usize,
    /// Overscan applied to both virtualizers.
    pub overscan: usize,
    /// Row estimate for unmeasured list cards.
    pub item_height: usize,
    /// Fixture generator seed.
    pub seed: u64,
    /// Initial layout.
    pub view: ViewMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            count: 10_000,
            overscan: 10,
            item_height: 5,
            seed: 42,
            view: ViewMode::List,
        }
    }
}

impl Settings {
    /// Validates the command line into settings.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            count: COUNT.validate(cli.count)?,
            overscan: OVERSCAN.validate(cli.overscan)?,
            item_height: ITEM_HEIGHT.validate(cli.item_height)?,
            seed: cli.seed,
            view: cli.view,
        })
    }
}

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Publishes the settings for [`Demo::init`](crate::demo::Demo). Only the
/// first call has an effect.
pub fn install(settings: Settings) {
    if SETTINGS.set(settings).is_err() {
        tracing::warn!("settings already installed, ignoring");
    }
}

/// Installed settings, or defaults when nothing was installed.
pub fn current() -> Settings {
    SETTINGS.get().cloned().unwrap_or_default()
}
