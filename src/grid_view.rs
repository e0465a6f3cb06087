//! Virtualized responsive grid of cards.
//!
//! The virtualizer works on grid rows. A row is as tall as its tallest
//! card, so rows are estimated from the last measured height of each card
//! (keyed by item id) and measured as a whole once rendered. Changing the
//! column count regroups every row, which resets the row measurements and
//! rebuilds the estimates from the per-card heights.

use crate::card::{self, CardState, CardStyles};
use crate::catalog::Catalog;
use crate::data;
use crate::viewport::{self, Navigation};
use crate::virtualizer::{Align, Virtualizer, VirtualizerOptions};
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

/// Rows of a collapsed card with a full description: border, banner,
/// title and three description lines.
pub const DEFAULT_CARD_HEIGHT: usize = 9;

const COLUMN_GAP: usize = 1;
const ROW_GAP: usize = 1;
const MAX_PASSES: usize = 4;

/// Column count for a content width: below 80 columns one, below 120
/// two, otherwise three.
pub fn columns_for_width(width: usize) -> usize {
    match width {
        0..=79 => 1,
        80..=119 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone)]
struct RowBlock {
    row: usize,
    lines: Vec<String>,
}

/// Grid layout state.
#[derive(Debug)]
pub struct GridView {
    virtualizer: Virtualizer,
    indices: Vec<usize>,
    ids: Vec<u64>,
    columns: usize,
    cursor: usize,
    expanded: HashSet<u64>,
    heights: HashMap<u64, usize>,
    blocks: Vec<RowBlock>,
    seed: u64,
    /// Window the rows are cut into.
    pub viewport: viewport::Model,
    /// Card styles.
    pub styles: CardStyles,
}

impl GridView {
    /// An empty grid with the given overscan (in rows) and data seed.
    pub fn new(overscan: usize, seed: u64) -> Self {
        let virtualizer = Virtualizer::new(
            VirtualizerOptions::new(0, |_| DEFAULT_CARD_HEIGHT)
                .with_overscan(overscan)
                .with_gap(ROW_GAP),
        );
        let mut viewport = viewport::Model::default();
        viewport.keymap.set_columns_enabled(true);
        Self {
            virtualizer,
            indices: Vec::new(),
            ids: Vec::new(),
            columns: 1,
            cursor: 0,
            expanded: HashSet::new(),
            heights: HashMap::new(),
            blocks: Vec::new(),
            seed,
            viewport,
            styles: CardStyles::default(),
        }
    }

    /// Replaces the shown items and scrolls to the top.
    pub fn set_items(&mut self, catalog: &Catalog, indices: Vec<usize>) {
        self.ids = indices
            .iter()
            .filter_map(|&i| catalog.get(i).map(|item| item.id))
            .collect();
        self.indices = indices;
        self.cursor = 0;
        self.regroup();
        self.virtualizer.set_scroll_offset(0);
        self.sync(catalog, false);
    }

    /// Resizes the window, recomputing the column count.
    ///
    /// Card heights depend on the card width, so any width change drops
    /// the per-card heights as well.
    pub fn set_size(&mut self, catalog: &Catalog, width: usize, height: usize) {
        let width_changed = width != self.viewport.width;
        self.viewport.set_size(width, height);
        self.virtualizer.set_viewport_size(height);
        let columns = columns_for_width(self.viewport.content_width());
        if columns != self.columns {
            tracing::debug!(from = self.columns, to = columns, "grid columns changed");
            self.columns = columns;
        }
        if width_changed {
            self.heights.clear();
            self.regroup();
        }
        self.sync(catalog, true);
    }

    /// Changes the overscan, in rows.
    pub fn set_overscan(&mut self, catalog: &Catalog, overscan: usize) {
        self.virtualizer.set_overscan(overscan);
        self.sync(catalog, false);
    }

    /// The underlying row virtualizer.
    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    /// Current column count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of grid rows.
    pub fn row_count(&self) -> usize {
        self.indices.len().div_ceil(self.columns)
    }

    /// Number of items in the grid.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the grid shows nothing.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Filtered index under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Catalog index under the cursor.
    pub fn selected(&self) -> Option<usize> {
        self.indices.get(self.cursor).copied()
    }

    /// True when the card with `id` is expanded.
    pub fn is_expanded(&self, id: u64) -> bool {
        self.expanded.contains(&id)
    }

    /// Last measured height of the card with `id`.
    pub fn card_height(&self, id: u64) -> Option<usize> {
        self.heights.get(&id).copied()
    }

    /// Number of cards currently rendered, overscan included.
    pub fn rendered_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| self.row_items(b.row).len())
            .sum()
    }

    /// Moves the cursor in two dimensions and keeps its row in view.
    pub fn navigate(&mut self, catalog: &Catalog, nav: Navigation) {
        if self.indices.is_empty() {
            return;
        }
        let last = self.indices.len() - 1;
        let cols = self.columns;
        let (row, col) = (self.cursor / cols, self.cursor % cols);
        let page = self.viewport.height.max(1);
        self.cursor = match nav {
            Navigation::Up => self.cursor.checked_sub(cols).unwrap_or(self.cursor),
            Navigation::Down => {
                if (row + 1) * cols <= last {
                    (self.cursor + cols).min(last)
                } else {
                    self.cursor
                }
            }
            Navigation::Left if col > 0 => self.cursor - 1,
            Navigation::Right if col + 1 < cols && self.cursor < last => self.cursor + 1,
            Navigation::Left | Navigation::Right => self.cursor,
            Navigation::PageUp => self.row_at_distance(row, -(page as isize)) * cols + col,
            Navigation::PageDown => self.row_at_distance(row, page as isize) * cols + col,
            Navigation::HalfPageUp => {
                self.row_at_distance(row, -((page / 2).max(1) as isize)) * cols + col
            }
            Navigation::HalfPageDown => {
                self.row_at_distance(row, (page / 2).max(1) as isize) * cols + col
            }
            Navigation::Top => 0,
            Navigation::Bottom => last,
        }
        .min(last);
        self.sync(catalog, true);
    }

    /// Expands or collapses the card under the cursor.
    pub fn toggle_expanded(&mut self, catalog: &Catalog) {
        let Some(&id) = self.ids.get(self.cursor) else {
            return;
        };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        tracing::debug!(id, expanded = self.expanded.contains(&id), "grid card toggled");
        self.sync(catalog, true);
    }

    /// Renders the row range, records card and row heights and optionally
    /// scrolls the cursor row into view, until the range settles.
    pub fn sync(&mut self, catalog: &Catalog, follow_cursor: bool) {
        self.blocks.clear();
        if self.indices.is_empty() {
            return;
        }
        let cursor_row = self.cursor / self.columns;
        for _ in 0..MAX_PASSES {
            if follow_cursor {
                self.virtualizer.scroll_to_index(cursor_row, Align::Auto);
            }
            let range = self.virtualizer.range();
            let blocks: Vec<RowBlock> = range
                .clone()
                .map(|row| RowBlock {
                    row,
                    lines: self.render_row(catalog, row),
                })
                .collect();
            self.virtualizer
                .measure_many(blocks.iter().map(|b| (b.row, b.lines.len())));
            self.blocks = blocks;
            let settled = self.virtualizer.range() == range
                && (!follow_cursor
                    || self.virtualizer.scroll_to_index_offset(cursor_row, Align::Auto)
                        == self.virtualizer.scroll_offset());
            if settled {
                break;
            }
        }
    }

    /// The window of rendered rows.
    pub fn view(&self) -> String {
        let placed: Vec<(usize, &[String])> = self
            .blocks
            .iter()
            .filter_map(|b| {
                self.virtualizer
                    .item(b.row)
                    .map(|item| (item.start, b.lines.as_slice()))
            })
            .collect();
        self.viewport.render(
            placed,
            self.virtualizer.scroll_offset(),
            self.virtualizer.total_size(),
        )
    }

    fn row_at_distance(&self, row: usize, rows: isize) -> usize {
        let last = self.row_count().saturating_sub(1);
        let Some(item) = self.virtualizer.item(row) else {
            return row;
        };
        let target = if rows < 0 {
            item.start.saturating_sub(rows.unsigned_abs())
        } else {
            item.start + rows as usize
        };
        match self.virtualizer.item_at_offset(target) {
            Some(found) => found,
            None if rows < 0 => 0,
            None => last,
        }
    }

    fn row_items(&self, row: usize) -> Range<usize> {
        let start = (row * self.columns).min(self.indices.len());
        start..(start + self.columns).min(self.indices.len())
    }

    /// Rebuilds the row count and estimates and drops row measurements.
    fn regroup(&mut self) {
        let estimates: Arc<Vec<usize>> = Arc::new(
            (0..self.row_count())
                .map(|row| {
                    self.row_items(row)
                        .map(|i| {
                            self.ids
                                .get(i)
                                .and_then(|id| self.heights.get(id))
                                .copied()
                                .unwrap_or(DEFAULT_CARD_HEIGHT)
                        })
                        .max()
                        .unwrap_or(DEFAULT_CARD_HEIGHT)
                })
                .collect(),
        );
        self.virtualizer.set_count(estimates.len());
        self.virtualizer.set_estimate_size(move |row| {
            estimates.get(row).copied().unwrap_or(DEFAULT_CARD_HEIGHT)
        });
        self.virtualizer.reset_measurements();
    }

    fn card_width(&self) -> usize {
        let gaps = COLUMN_GAP * (self.columns - 1);
        self.viewport.content_width().saturating_sub(gaps) / self.columns
    }

    fn render_row(&mut self, catalog: &Catalog, row: usize) -> Vec<String> {
        let width = self.card_width();
        let content_width = self.viewport.content_width();
        let mut cards: Vec<Vec<String>> = Vec::with_capacity(self.columns);
        for index in self.row_items(row) {
            let Some(item) = catalog.get(self.indices[index]) else {
                continue;
            };
            let expanded = self.expanded.contains(&item.id);
            let state = CardState {
                selected: index == self.cursor,
                expanded,
            };
            let details =
                expanded.then(|| data::details(self.seed, item.id, card::GRID_DETAIL_SENTENCES));
            let lines = card::render_grid_card(item, state, details.as_deref(), width, &self.styles);
            self.heights.insert(item.id, lines.len());
            cards.push(lines);
        }

        let height = cards.iter().map(Vec::len).max().unwrap_or(0);
        let blank_card = " ".repeat(width);
        let gap = " ".repeat(COLUMN_GAP);
        (0..height)
            .map(|line| {
                let joined = cards
                    .iter()
                    .map(|c| c.get(line).map_or(blank_card.as_str(), String::as_str))
                    .collect::<Vec<_>>()
                    .join(&gap);
                let used = cards.len() * width + cards.len().saturating_sub(1) * COLUMN_GAP;
                format!("{}{}", joined, " ".repeat(content_width.saturating_sub(used)))
            })
            .collect()
    }
}
