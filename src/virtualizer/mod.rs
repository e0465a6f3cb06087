//! Viewport virtualization bookkeeping.
//!
//! A [`Virtualizer`] answers one question for a scrollable axis: which
//! items intersect the viewport right now, and where do they sit? It knows
//! nothing about rendering. Callers feed it
//!
//! - the item count and a size estimate for items it has not seen yet,
//! - the viewport size and scroll offset,
//! - measured sizes, once an item has actually been rendered,
//!
//! and read back the index [`range`](Virtualizer::range) to render, each
//! item's start offset, and the [`total_size`](Virtualizer::total_size) of
//! the scrollable content.
//!
//! # Layout
//!
//! Items are laid out contiguously along the axis:
//!
//! ```text
//! padding_start | item 0 | gap | item 1 | gap | ... | item n-1 | padding_end
//! ```
//!
//! The layout is cached and rebuilt only from the first index whose size
//! changed, so measuring the handful of visible items in a 50 000 item list
//! touches the tail of the cache once per update, not once per item.
//!
//! # Measurements
//!
//! Measured sizes are keyed by [`item_key`](VirtualizerOptions::with_item_key),
//! not by position. Filtering or re-sorting the underlying data with a key
//! function that follows the data keeps every measurement valid.
//!
//! When an item that starts above the scroll offset changes size, the
//! scroll offset is shifted by the same delta so the content under the
//! viewport does not jump.
//!
//! # Example
//!
//! ```rust
//! use virtual_scroll_demo::virtualizer::{Align, Virtualizer, VirtualizerOptions};
//!
//! let mut v = Virtualizer::new(VirtualizerOptions::new(10_000, |_| 4).with_overscan(2));
//! v.set_viewport_size(20);
//! v.set_scroll_offset(400);
//!
//! assert_eq!(v.visible_range(), 100..105);
//! assert_eq!(v.range(), 98..107);
//!
//! // Item 99 turned out taller than estimated: content below shifts down,
//! // and so does the scroll offset, keeping item 100 in place on screen.
//! let applied = v.measure(99, 6);
//! assert_eq!(applied, 2);
//! assert_eq!(v.scroll_offset(), 402);
//!
//! let target = v.scroll_to_index_offset(0, Align::Start);
//! v.set_scroll_offset(target);
//! assert_eq!(v.visible_range().start, 0);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Range;

#[cfg(test)]
mod tests;

/// Where a target item should land when scrolling to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Item start at the viewport start.
    Start,
    /// Item centered in the viewport.
    Center,
    /// Item end at the viewport end.
    End,
    /// Scroll as little as possible to bring the item fully into view.
    #[default]
    Auto,
}

/// Position of one item along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualItem {
    /// Item index.
    pub index: usize,
    /// Item key used for its measurement.
    pub key: u64,
    /// Offset of the first row/column of the item.
    pub start: usize,
    /// Measured or estimated size.
    pub size: usize,
    /// `start + size`.
    pub end: usize,
}

type EstimateFn = Box<dyn Fn(usize) -> usize + Send + Sync>;
type KeyFn = Box<dyn Fn(usize) -> u64 + Send + Sync>;

/// Construction parameters for a [`Virtualizer`].
pub struct VirtualizerOptions {
    count: usize,
    estimate_size: EstimateFn,
    item_key: KeyFn,
    overscan: usize,
    padding_start: usize,
    padding_end: usize,
    gap: usize,
}

impl VirtualizerOptions {
    /// Options for `count` items sized by `estimate_size` until measured.
    ///
    /// Defaults: overscan 1, no padding, no gap, keys equal to indices.
    pub fn new<F>(count: usize, estimate_size: F) -> Self
    where
        F: Fn(usize) -> usize + Send + Sync + 'static,
    {
        Self {
            count,
            estimate_size: Box::new(estimate_size),
            item_key: Box::new(|i| i as u64),
            overscan: 1,
            padding_start: 0,
            padding_end: 0,
            gap: 0,
        }
    }

    /// Items kept beyond each edge of the viewport.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Space before the first and after the last item.
    pub fn with_padding(mut self, start: usize, end: usize) -> Self {
        self.padding_start = start;
        self.padding_end = end;
        self
    }

    /// Space between consecutive items.
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Key function for measurements.
    pub fn with_item_key<F>(mut self, item_key: F) -> Self
    where
        F: Fn(usize) -> u64 + Send + Sync + 'static,
    {
        self.item_key = Box::new(item_key);
        self
    }
}

impl fmt::Debug for VirtualizerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualizerOptions")
            .field("count", &self.count)
            .field("overscan", &self.overscan)
            .field("padding_start", &self.padding_start)
            .field("padding_end", &self.padding_end)
            .field("gap", &self.gap)
            .finish_non_exhaustive()
    }
}

/// Visible-range calculator for one scroll axis.
#[derive(Debug)]
pub struct Virtualizer {
    options: VirtualizerOptions,
    viewport_size: usize,
    scroll_offset: usize,
    measured: HashMap<u64, usize>,
    layout: Vec<VirtualItem>,
}

impl Virtualizer {
    /// Creates a virtualizer with an empty viewport scrolled to the top.
    pub fn new(options: VirtualizerOptions) -> Self {
        let mut v = Self {
            options,
            viewport_size: 0,
            scroll_offset: 0,
            measured: HashMap::new(),
            layout: Vec::new(),
        };
        v.relayout_from(0);
        v
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Current overscan.
    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    /// Viewport size along the axis.
    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Changes the item count, keeping measurements and the layout prefix.
    pub fn set_count(&mut self, count: usize) {
        if count == self.options.count {
            return;
        }
        let keep = self.options.count.min(count);
        self.options.count = count;
        self.layout.truncate(keep);
        self.relayout_from(keep);
        self.clamp_scroll();
    }

    /// Changes the overscan.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    /// Replaces the size estimate. Measured items keep their sizes.
    pub fn set_estimate_size<F>(&mut self, estimate_size: F)
    where
        F: Fn(usize) -> usize + Send + Sync + 'static,
    {
        self.options.estimate_size = Box::new(estimate_size);
        self.relayout_from(0);
        self.clamp_scroll();
    }

    /// Replaces the key function, e.g. after the data was filtered or sorted.
    pub fn set_item_key<F>(&mut self, item_key: F)
    where
        F: Fn(usize) -> u64 + Send + Sync + 'static,
    {
        self.options.item_key = Box::new(item_key);
        self.relayout_from(0);
        self.clamp_scroll();
    }

    /// Changes the viewport size and re-clamps the scroll offset.
    pub fn set_viewport_size(&mut self, size: usize) {
        self.viewport_size = size;
        self.clamp_scroll();
    }

    /// Largest valid scroll offset.
    pub fn max_scroll_offset(&self) -> usize {
        self.total_size().saturating_sub(self.viewport_size)
    }

    /// Scrolls to `offset`, clamped to `0..=max_scroll_offset()`.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.max_scroll_offset());
    }

    /// Scrolls by a signed delta, clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.set_scroll_offset(target);
    }

    /// True when scrolled to the very top.
    pub fn at_top(&self) -> bool {
        self.scroll_offset == 0
    }

    /// True when the last row of content is in view.
    pub fn at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll_offset()
    }

    /// Scroll position as a fraction in `0.0..=1.0`.
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_scroll_offset();
        if max == 0 {
            return 1.0;
        }
        self.scroll_offset as f64 / max as f64
    }

    /// Size of all content including padding and gaps.
    pub fn total_size(&self) -> usize {
        match self.layout.last() {
            Some(last) => last.end + self.options.padding_end,
            None => self.options.padding_start + self.options.padding_end,
        }
    }

    /// Layout of every item.
    pub fn measurements(&self) -> &[VirtualItem] {
        &self.layout
    }

    /// Layout of one item.
    pub fn item(&self, index: usize) -> Option<&VirtualItem> {
        self.layout.get(index)
    }

    /// True if the item at `index` has a recorded measurement.
    pub fn is_measured(&self, index: usize) -> bool {
        index < self.options.count && self.measured.contains_key(&(self.options.item_key)(index))
    }

    /// Index of the item covering `offset`, or the one after a gap.
    pub fn item_at_offset(&self, offset: usize) -> Option<usize> {
        if self.layout.is_empty() {
            return None;
        }
        // Last item whose start is <= offset.
        let pos = self.layout.partition_point(|item| item.start <= offset);
        let mut index = pos.saturating_sub(1);
        if self.layout[index].end <= offset && index + 1 < self.layout.len() {
            index += 1;
        }
        if self.layout[index].end <= offset {
            return None;
        }
        Some(index)
    }

    /// Items intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> Range<usize> {
        if self.layout.is_empty() || self.viewport_size == 0 {
            return 0..0;
        }
        let Some(start) = self.item_at_offset(self.scroll_offset) else {
            return 0..0;
        };
        let viewport_end = self.scroll_offset + self.viewport_size;
        let mut end = start + 1;
        while end < self.layout.len() && self.layout[end].start < viewport_end {
            end += 1;
        }
        start..end
    }

    /// Items to render: the visible range widened by overscan.
    pub fn range(&self) -> Range<usize> {
        let visible = self.visible_range();
        if visible.is_empty() {
            return visible;
        }
        let overscan = self.options.overscan;
        visible.start.saturating_sub(overscan)..(visible.end + overscan).min(self.options.count)
    }

    /// Layout entries of [`range`](Self::range).
    pub fn virtual_items(&self) -> &[VirtualItem] {
        &self.layout[self.range()]
    }

    /// Records the measured size of `index`.
    ///
    /// Returns the scroll adjustment that was applied: non-zero only when the
    /// item starts above the scroll offset and its size changed.
    pub fn measure(&mut self, index: usize, size: usize) -> isize {
        self.measure_many([(index, size)])
    }

    /// Records several measurements with a single relayout.
    ///
    /// Returns the total scroll adjustment.
    pub fn measure_many<I>(&mut self, sizes: I) -> isize
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        // Ordered by index; a repeated index keeps its last size.
        let sizes: BTreeMap<usize, usize> = sizes
            .into_iter()
            .filter(|&(index, _)| index < self.options.count)
            .collect();
        if sizes.is_empty() {
            return 0;
        }

        let mut first_dirty = None;
        let mut shift: isize = 0;
        let mut adjustment: isize = 0;
        for (index, size) in sizes {
            let item = self.layout[index];
            let delta = size as isize - item.size as isize;
            self.measured.insert(item.key, size);
            if delta == 0 {
                continue;
            }
            first_dirty.get_or_insert(index);
            let start = item.start as isize + shift;
            if start < self.scroll_offset as isize + adjustment {
                adjustment += delta;
            }
            shift += delta;
        }

        let Some(first_dirty) = first_dirty else {
            return 0;
        };
        self.relayout_from(first_dirty);

        let before = self.scroll_offset;
        let target = (self.scroll_offset as isize + adjustment).max(0) as usize;
        self.set_scroll_offset(target);
        let applied = self.scroll_offset as isize - before as isize;
        if applied != 0 {
            tracing::trace!(first_dirty, applied, "scroll adjusted for measurement");
        }
        applied
    }

    /// Records a measured size without touching the scroll offset.
    pub fn measure_unadjusted(&mut self, index: usize, size: usize) {
        if index >= self.options.count {
            return;
        }
        let item = self.layout[index];
        self.measured.insert(item.key, size);
        if item.size != size {
            self.relayout_from(index);
            self.clamp_scroll();
        }
    }

    /// Forgets every measurement.
    pub fn reset_measurements(&mut self) {
        self.measured.clear();
        self.relayout_from(0);
        self.clamp_scroll();
    }

    /// Scroll offset that shows `index` with the given alignment, clamped.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> usize {
        let Some(item) = self.layout.get(index.min(self.layout.len().saturating_sub(1))) else {
            return 0;
        };
        let viewport = self.viewport_size;
        let view_end = self.scroll_offset + viewport;
        let offset = match align {
            Align::Start => item.start,
            Align::End => item.end.saturating_sub(viewport),
            Align::Center => (item.start + item.size / 2).saturating_sub(viewport / 2),
            Align::Auto => {
                if item.start >= self.scroll_offset && item.end <= view_end {
                    self.scroll_offset
                } else if item.start < self.scroll_offset || item.size >= viewport {
                    item.start
                } else {
                    item.end.saturating_sub(viewport)
                }
            }
        };
        offset.min(self.max_scroll_offset())
    }

    /// Scrolls so that `index` is shown with the given alignment.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
    }

    fn size_of(&self, index: usize, key: u64) -> usize {
        self.measured
            .get(&key)
            .copied()
            .unwrap_or_else(|| (self.options.estimate_size)(index))
    }

    fn relayout_from(&mut self, from: usize) {
        let count = self.options.count;
        let from = from.min(self.layout.len()).min(count);
        self.layout.truncate(from);
        self.layout.reserve(count - from);

        let mut start = match from.checked_sub(1).and_then(|i| self.layout.get(i)) {
            Some(prev) => prev.end + self.options.gap,
            None => self.options.padding_start,
        };
        for index in from..count {
            let key = (self.options.item_key)(index);
            let size = self.size_of(index, key);
            self.layout.push(VirtualItem {
                index,
                key,
                start,
                size,
                end: start + size,
            });
            start += size + self.options.gap;
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }
}
