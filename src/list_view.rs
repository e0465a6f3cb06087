//! Virtualized single-column list of cards.
//!
//! Only the cards in the virtualizer's [`range`](Virtualizer::range) are
//! ever rendered. Each sync renders them, feeds their line counts back as
//! measurements and keeps the cursor card in view, repeating until the
//! range settles.

use crate::card::{self, CardState, CardStyles};
use crate::catalog::Catalog;
use crate::data;
use crate::viewport::{self, Navigation};
use crate::virtualizer::{Align, Virtualizer, VirtualizerOptions};
use std::collections::HashSet;
use std::sync::Arc;

/// Measurement passes per sync. Two normally suffice: one to measure
/// the estimated range, one to fill any rows the measurements exposed.
const MAX_PASSES: usize = 4;

/// A rendered card and the filtered index it belongs to.
#[derive(Debug, Clone)]
struct Block {
    index: usize,
    lines: Vec<String>,
}

/// List layout state.
#[derive(Debug)]
pub struct ListView {
    virtualizer: Virtualizer,
    indices: Vec<usize>,
    ids: Arc<Vec<u64>>,
    cursor: usize,
    expanded: HashSet<u64>,
    blocks: Vec<Block>,
    seed: u64,
    /// Window the cards are cut into.
    pub viewport: viewport::Model,
    /// Card styles.
    pub styles: CardStyles,
}

impl ListView {
    /// An empty list with the given row estimate, overscan and data seed.
    pub fn new(item_height: usize, overscan: usize, seed: u64) -> Self {
        let virtualizer =
            Virtualizer::new(VirtualizerOptions::new(0, move |_| item_height).with_overscan(overscan));
        let mut viewport = viewport::Model::default();
        viewport.keymap.set_columns_enabled(false);
        Self {
            virtualizer,
            indices: Vec::new(),
            ids: Arc::new(Vec::new()),
            cursor: 0,
            expanded: HashSet::new(),
            blocks: Vec::new(),
            seed,
            viewport,
            styles: CardStyles::default(),
        }
    }

    /// Replaces the shown items with catalog `indices` and scrolls to the
    /// top. Measurements follow item ids, so items seen before keep their
    /// heights.
    pub fn set_items(&mut self, catalog: &Catalog, indices: Vec<usize>) {
        let ids: Arc<Vec<u64>> = Arc::new(
            indices
                .iter()
                .filter_map(|&i| catalog.get(i).map(|item| item.id))
                .collect(),
        );
        self.ids = Arc::clone(&ids);
        self.indices = indices;
        self.virtualizer
            .set_item_key(move |i| ids.get(i).copied().unwrap_or(i as u64));
        self.virtualizer.set_count(self.indices.len());
        self.cursor = 0;
        self.virtualizer.set_scroll_offset(0);
        self.sync(catalog, false);
    }

    /// Resizes the window. A width change invalidates every measurement.
    pub fn set_size(&mut self, catalog: &Catalog, width: usize, height: usize) {
        let width_changed = width != self.viewport.width;
        self.viewport.set_size(width, height);
        if width_changed {
            self.virtualizer.reset_measurements();
        }
        self.virtualizer.set_viewport_size(height);
        self.sync(catalog, true);
    }

    /// Changes the overscan.
    pub fn set_overscan(&mut self, catalog: &Catalog, overscan: usize) {
        self.virtualizer.set_overscan(overscan);
        self.sync(catalog, false);
    }

    /// Changes the row estimate for cards that were never rendered.
    pub fn set_item_height(&mut self, catalog: &Catalog, item_height: usize) {
        self.virtualizer.set_estimate_size(move |_| item_height);
        self.sync(catalog, false);
    }

    /// The underlying virtualizer.
    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the list shows nothing.
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

    /// Number of cards currently rendered, overscan included.
    pub fn rendered_count(&self) -> usize {
        self.blocks.len()
    }

    /// Moves the cursor and scrolls to keep it in view.
    pub fn navigate(&mut self, catalog: &Catalog, nav: Navigation) {
        if self.indices.is_empty() {
            return;
        }
        let last = self.indices.len() - 1;
        let page = self.viewport.height.max(1);
        self.cursor = match nav {
            Navigation::Up => self.cursor.saturating_sub(1),
            Navigation::Down => (self.cursor + 1).min(last),
            Navigation::Left | Navigation::Right => self.cursor,
            Navigation::PageUp => self.cursor_at_distance(-(page as isize)),
            Navigation::PageDown => self.cursor_at_distance(page as isize),
            Navigation::HalfPageUp => self.cursor_at_distance(-((page / 2).max(1) as isize)),
            Navigation::HalfPageDown => self.cursor_at_distance((page / 2).max(1) as isize),
            Navigation::Top => 0,
            Navigation::Bottom => last,
        };
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
        tracing::debug!(id, expanded = self.expanded.contains(&id), "list card toggled");
        self.sync(catalog, true);
    }

    /// Renders the range, measures it and optionally scrolls the cursor
    /// into view, until the range no longer changes.
    pub fn sync(&mut self, catalog: &Catalog, follow_cursor: bool) {
        self.blocks.clear();
        if self.indices.is_empty() {
            return;
        }
        for _ in 0..MAX_PASSES {
            if follow_cursor {
                self.virtualizer.scroll_to_index(self.cursor, Align::Auto);
            }
            let range = self.virtualizer.range();
            let blocks: Vec<Block> = range
                .clone()
                .map(|index| Block {
                    index,
                    lines: self.render_card(catalog, index),
                })
                .collect();
            self.virtualizer
                .measure_many(blocks.iter().map(|b| (b.index, b.lines.len())));
            self.blocks = blocks;
            let settled = self.virtualizer.range() == range
                && (!follow_cursor
                    || self.virtualizer.scroll_to_index_offset(self.cursor, Align::Auto)
                        == self.virtualizer.scroll_offset());
            if settled {
                break;
            }
        }
    }

    /// The window of rendered cards.
    pub fn view(&self) -> String {
        let placed: Vec<(usize, &[String])> = self
            .blocks
            .iter()
            .filter_map(|b| {
                self.virtualizer
                    .item(b.index)
                    .map(|item| (item.start, b.lines.as_slice()))
            })
            .collect();
        self.viewport.render(
            placed,
            self.virtualizer.scroll_offset(),
            self.virtualizer.total_size(),
        )
    }

    fn cursor_at_distance(&self, rows: isize) -> usize {
        let last = self.indices.len().saturating_sub(1);
        let Some(item) = self.virtualizer.item(self.cursor) else {
            return self.cursor;
        };
        let target = if rows < 0 {
            item.start.saturating_sub(rows.unsigned_abs())
        } else {
            item.start + rows as usize
        };
        match self.virtualizer.item_at_offset(target) {
            Some(index) => index,
            None if rows < 0 => 0,
            None => last,
        }
    }

    fn render_card(&self, catalog: &Catalog, index: usize) -> Vec<String> {
        let Some(item) = self.indices.get(index).and_then(|&i| catalog.get(i)) else {
            return Vec::new();
        };
        let expanded = self.expanded.contains(&item.id);
        let state = CardState {
            selected: index == self.cursor,
            expanded,
        };
        let details = expanded.then(|| data::details(self.seed, item.id, card::LIST_DETAIL_SENTENCES));
        card::render_list_card(
            item,
            state,
            details.as_deref(),
            self.viewport.content_width(),
            &self.styles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(count: usize) -> (Catalog, ListView) {
        let catalog = Catalog::new(data::generate_items(count, 7));
        let mut list = ListView::new(5, 2, 7);
        list.set_size(&catalog, 60, 20);
        let all = catalog.query("", None);
        list.set_items(&catalog, all);
        (catalog, list)
    }

    #[test]
    fn test_renders_only_the_window() {
        let (_, list) = setup(1000);
        assert_eq!(list.len(), 1000);
        assert!(list.rendered_count() > 0);
        assert!(list.rendered_count() < 20);
        let view = list.view();
        assert_eq!(view.lines().count(), 20);
    }

    #[test]
    fn test_measurements_replace_estimates() {
        let (_, list) = setup(100);
        let range = list.virtualizer().range();
        for index in range {
            assert!(list.virtualizer().is_measured(index));
        }
    }

    #[test]
    fn test_cursor_stays_in_view() {
        let (catalog, mut list) = setup(500);
        for _ in 0..40 {
            list.navigate(&catalog, Navigation::Down);
        }
        assert_eq!(list.cursor(), 40);
        let v = list.virtualizer();
        let item = v.item(40).copied().expect("cursor item");
        assert!(item.start >= v.scroll_offset());
        assert!(item.end <= v.scroll_offset() + v.viewport_size());

        list.navigate(&catalog, Navigation::Bottom);
        assert_eq!(list.cursor(), 499);
        assert!(list.virtualizer().at_bottom());

        list.navigate(&catalog, Navigation::Top);
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.virtualizer().scroll_offset(), 0);
    }

    #[test]
    fn test_page_down_moves_by_a_window() {
        let (catalog, mut list) = setup(500);
        list.navigate(&catalog, Navigation::PageDown);
        // 20 rows of 5-row cards.
        assert_eq!(list.cursor(), 4);
        list.navigate(&catalog, Navigation::PageUp);
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_expanded_state_survives_scrolling() {
        let (catalog, mut list) = setup(500);
        let id = catalog.get(0).map(|i| i.id).expect("first item");
        let before = list.virtualizer().item(0).map(|i| i.size);
        list.toggle_expanded(&catalog);
        assert!(list.is_expanded(id));
        let after = list.virtualizer().item(0).map(|i| i.size);
        assert!(after > before);

        list.navigate(&catalog, Navigation::Bottom);
        list.navigate(&catalog, Navigation::Top);
        assert!(list.is_expanded(id));
        assert_eq!(list.virtualizer().item(0).map(|i| i.size), after);
    }

    #[test]
    fn test_empty_list() {
        let (catalog, mut list) = setup(10);
        list.set_items(&catalog, Vec::new());
        assert!(list.is_empty());
        assert_eq!(list.rendered_count(), 0);
        list.navigate(&catalog, Navigation::Down);
        list.toggle_expanded(&catalog);
        assert_eq!(list.view().lines().count(), 20);
    }
}
