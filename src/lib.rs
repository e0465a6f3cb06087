#![warn(missing_docs)]

//! # virtual-scroll-demo
//!
//! A terminal demo of viewport virtualization: scroll through tens of
//! thousands of generated items while only the handful in view (plus a
//! configurable overscan) is ever rendered.
//!
//! ## Overview
//!
//! The interesting part is [`virtualizer`]: given an item count, a size
//! estimate, a viewport and a scroll offset, it computes which index range
//! to render and where each item sits. Rendered items report their real
//! height back, and the layout (and, for items above the viewport, the
//! scroll offset) adjusts without the content jumping.
//!
//! Everything else is built on top of it in the Elm architecture of
//! [bubbletea-rs](https://crates.io/crates/bubbletea-rs):
//!
//! - **Data**: [`data`] generates deterministic fixture items,
//!   [`catalog`] searches and sorts them
//! - **Views**: [`list_view`] and [`grid_view`] render [`card`]s through a
//!   [`viewport`] window
//! - **Input**: [`search`], [`controls`], [`key`] bindings and [`help`]
//! - **App**: [`demo::Demo`] is the bubbletea model run by the binary
//!
//! ## Focus Management
//!
//! Input components implement [`Component`]:
//!
//! ```rust
//! use virtual_scroll_demo::prelude::*;
//!
//! fn cycle<T: Component>(component: &mut T) {
//!     let _ = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut search = SearchInput::new();
//! cycle(&mut search);
//! ```
//!
//! ## Driving the model without a terminal
//!
//! ```rust
//! use virtual_scroll_demo::prelude::*;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut demo = Demo::new(Settings { count: 500, ..Settings::default() }, 100, 30);
//! demo.handle_key(&KeyMsg { key: KeyCode::Char('v'), modifiers: KeyModifiers::NONE });
//! assert_eq!(demo.view_mode(), ViewMode::Grid);
//! assert!(demo.status_line().starts_with("Showing 500 items"));
//! ```

pub mod card;
pub mod catalog;
pub mod config;
pub mod controls;
pub mod data;
pub mod demo;
pub mod error;
pub mod grid_view;
pub mod help;
pub mod key;
pub mod list_view;
pub mod logging;
pub mod search;
pub mod text;
pub mod viewport;
pub mod virtualizer;

use bubbletea_rs::Cmd;

/// Keyboard focus for input components.
///
/// `focus()` may return a command to start focus-related work; none of
/// the components in this crate need one.
pub trait Component {
    /// Gives the component keyboard focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes keyboard focus away.
    fn blur(&mut self);

    /// True while focused.
    fn focused(&self) -> bool;
}

pub use catalog::{Catalog, SortDirection};
pub use config::{Settings, ViewMode};
pub use controls::{Controls, Setting};
pub use demo::{Demo, Focus};
pub use error::{Error, Result};
pub use grid_view::GridView;
pub use list_view::ListView;
pub use search::SearchInput;
pub use viewport::Navigation;
pub use virtualizer::{Align, VirtualItem, Virtualizer, VirtualizerOptions};

/// Common imports.
pub mod prelude {
    pub use crate::catalog::{Catalog, SortDirection};
    pub use crate::config::{Settings, ViewMode};
    pub use crate::controls::{Controls, Setting};
    pub use crate::demo::{Demo, Focus};
    pub use crate::help::{KeyMap, Model as HelpModel};
    pub use crate::key::{matches, Binding, Help as KeyHelp, KeyPress};
    pub use crate::search::SearchInput;
    pub use crate::viewport::{Model as Viewport, Navigation};
    pub use crate::virtualizer::{Align, VirtualItem, Virtualizer, VirtualizerOptions};
    pub use crate::Component;
}
