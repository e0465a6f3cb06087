//! Tests for the virtualizer.

use super::*;
use proptest::prelude::*;

fn fixed(count: usize, size: usize) -> Virtualizer {
    Virtualizer::new(VirtualizerOptions::new(count, move |_| size).with_overscan(0))
}

#[test]
fn test_empty_list_has_no_range() {
    let mut v = fixed(0, 3);
    v.set_viewport_size(10);
    assert_eq!(v.total_size(), 0);
    assert_eq!(v.visible_range(), 0..0);
    assert_eq!(v.range(), 0..0);
    assert!(v.virtual_items().is_empty());
    assert_eq!(v.scroll_to_index_offset(5, Align::Start), 0);
    assert_eq!(v.item_at_offset(0), None);
}

#[test]
fn test_zero_viewport_renders_nothing() {
    let v = fixed(100, 3);
    assert_eq!(v.viewport_size(), 0);
    assert_eq!(v.visible_range(), 0..0);
    assert_eq!(v.total_size(), 300);
}

#[test]
fn test_fixed_size_ranges() {
    let mut v = fixed(1000, 1);
    v.set_viewport_size(20);
    assert_eq!(v.visible_range(), 0..20);

    v.set_scroll_offset(100);
    assert_eq!(v.visible_range(), 100..120);

    v.set_scroll_offset(10_000);
    assert_eq!(v.scroll_offset(), 980);
    assert_eq!(v.visible_range(), 980..1000);
    assert!(v.at_bottom());
    assert!((v.scroll_percent() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_partial_items_count_as_visible() {
    let mut v = fixed(100, 4);
    v.set_viewport_size(10);
    v.set_scroll_offset(2);
    // Item 0 is half visible, items 1 and 2 are fully visible, item 3
    // starts at 12 which is the viewport end.
    assert_eq!(v.visible_range(), 0..3);
    v.set_scroll_offset(3);
    assert_eq!(v.visible_range(), 0..4);
}

#[test]
fn test_overscan_is_clamped_to_bounds() {
    let mut v = Virtualizer::new(VirtualizerOptions::new(50, |_| 2).with_overscan(5));
    v.set_viewport_size(10);
    assert_eq!(v.visible_range(), 0..5);
    assert_eq!(v.range(), 0..10);

    v.set_scroll_offset(40);
    assert_eq!(v.visible_range(), 20..25);
    assert_eq!(v.range(), 15..30);

    v.set_scroll_offset(90);
    assert_eq!(v.visible_range(), 45..50);
    assert_eq!(v.range(), 40..50);

    v.set_overscan(0);
    assert_eq!(v.range(), v.visible_range());
    assert_eq!(v.virtual_items().len(), 5);
    assert_eq!(v.virtual_items()[0].index, 45);
}

#[test]
fn test_padding_and_gap_layout() {
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(3, |_| 4)
            .with_padding(1, 2)
            .with_gap(1),
    );
    let starts: Vec<usize> = v.measurements().iter().map(|m| m.start).collect();
    assert_eq!(starts, vec![1, 6, 11]);
    assert_eq!(v.total_size(), 1 + 4 + 1 + 4 + 1 + 4 + 2);

    // Offset inside a gap resolves to the next item.
    assert_eq!(v.item_at_offset(5), Some(1));
    // Offset inside the leading padding resolves to the first item.
    assert_eq!(v.item_at_offset(0), Some(0));
    // Offset in the trailing padding has no item.
    assert_eq!(v.item_at_offset(15), None);

    v.set_viewport_size(5);
    v.set_scroll_offset(5);
    assert_eq!(v.visible_range(), 1..2);
}

#[test]
fn test_estimate_is_per_index() {
    let v = Virtualizer::new(VirtualizerOptions::new(4, |i| i + 1));
    let sizes: Vec<usize> = v.measurements().iter().map(|m| m.size).collect();
    assert_eq!(sizes, vec![1, 2, 3, 4]);
    assert_eq!(v.total_size(), 10);
}

#[test]
fn test_measure_below_viewport_does_not_scroll() {
    let mut v = fixed(100, 5);
    v.set_viewport_size(20);
    v.set_scroll_offset(50);
    let applied = v.measure(20, 9);
    assert_eq!(applied, 0);
    assert_eq!(v.scroll_offset(), 50);
    assert_eq!(v.item(20).map(|i| i.size), Some(9));
    assert_eq!(v.item(21).map(|i| i.start), Some(109));
    assert_eq!(v.total_size(), 504);
    assert!(v.is_measured(20));
    assert!(!v.is_measured(21));
}

#[test]
fn test_measure_above_viewport_keeps_content_in_place() {
    let mut v = fixed(100, 5);
    v.set_viewport_size(20);
    v.set_scroll_offset(50);
    let first_visible = v.visible_range().start;
    assert_eq!(first_visible, 10);

    let applied = v.measure(3, 2);
    assert_eq!(applied, -3);
    assert_eq!(v.scroll_offset(), 47);
    // The same item is still at the top of the viewport.
    assert_eq!(v.visible_range().start, first_visible);
    assert_eq!(
        v.item(first_visible).map(|i| i.start),
        Some(v.scroll_offset())
    );
}

#[test]
fn test_measure_many_accumulates_adjustments() {
    let mut v = fixed(100, 5);
    v.set_viewport_size(20);
    v.set_scroll_offset(50);
    let applied = v.measure_many(vec![(9, 7), (0, 6), (10, 1), (11, 8)]);
    // Items 0 and 9 start above offset 50; items 10 and 11 do not.
    assert_eq!(applied, 3);
    assert_eq!(v.scroll_offset(), 53);
    assert_eq!(v.item(10).map(|i| i.start), Some(53));
    assert_eq!(v.measure_many(Vec::new()), 0);
    assert_eq!(v.measure_many(vec![(500, 3)]), 0);
}

#[test]
fn test_measure_repeated_index_keeps_last_size() {
    let mut v = fixed(10, 5);
    v.measure_many(vec![(2, 9), (2, 3)]);
    assert_eq!(v.item(2).map(|i| i.size), Some(3));
    assert_eq!(v.total_size(), 48);
}

#[test]
fn test_measure_unadjusted_leaves_offset() {
    let mut v = fixed(100, 5);
    v.set_viewport_size(20);
    v.set_scroll_offset(50);
    v.measure_unadjusted(0, 10);
    assert_eq!(v.scroll_offset(), 50);
    assert_eq!(v.item(1).map(|i| i.start), Some(10));
}

#[test]
fn test_shrinking_content_reclamps_scroll() {
    let mut v = fixed(100, 5);
    v.set_viewport_size(20);
    v.set_scroll_offset(480);
    assert_eq!(v.scroll_offset(), 480);

    v.set_count(10);
    assert_eq!(v.total_size(), 50);
    assert_eq!(v.scroll_offset(), 30);

    v.set_count(0);
    assert_eq!(v.scroll_offset(), 0);
    assert!(v.at_top());
}

#[test]
fn test_measurements_follow_keys() {
    // Data ids in display order; the key function maps index to id.
    let ids: Vec<u64> = vec![10, 20, 30, 40];
    let keys = ids.clone();
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(ids.len(), |_| 2).with_item_key(move |i| keys[i]),
    );
    v.measure(1, 7); // id 20

    // Reverse the data; id 20 is now at index 2.
    let reversed: Vec<u64> = ids.iter().rev().copied().collect();
    v.set_item_key(move |i| reversed[i]);
    assert_eq!(v.item(1).map(|i| i.size), Some(2));
    assert_eq!(v.item(2).map(|i| i.size), Some(7));
    assert!(v.is_measured(2));

    v.reset_measurements();
    assert!(!v.is_measured(2));
    assert_eq!(v.total_size(), 8);
}

#[test]
fn test_growing_count_keeps_prefix_layout() {
    let mut v = fixed(3, 2);
    v.measure(1, 5);
    v.set_count(6);
    let sizes: Vec<usize> = v.measurements().iter().map(|m| m.size).collect();
    assert_eq!(sizes, vec![2, 5, 2, 2, 2, 2]);
    assert_eq!(v.total_size(), 15);
}

#[test]
fn test_set_estimate_size_keeps_measured() {
    let mut v = fixed(4, 2);
    v.measure(0, 9);
    v.set_estimate_size(|_| 3);
    let sizes: Vec<usize> = v.measurements().iter().map(|m| m.size).collect();
    assert_eq!(sizes, vec![9, 3, 3, 3]);
}

#[test]
fn test_scroll_to_index_alignment() {
    let mut v = fixed(100, 4);
    v.set_viewport_size(10);

    assert_eq!(v.scroll_to_index_offset(10, Align::Start), 40);
    assert_eq!(v.scroll_to_index_offset(10, Align::End), 34);
    assert_eq!(v.scroll_to_index_offset(10, Align::Center), 37);
    // Clamped to the last page.
    assert_eq!(v.scroll_to_index_offset(99, Align::Start), 390);
    // Out-of-range index is treated as the last item.
    assert_eq!(v.scroll_to_index_offset(1000, Align::Start), 390);

    // Auto: already visible means no movement.
    v.set_scroll_offset(40);
    assert_eq!(v.scroll_to_index_offset(10, Align::Auto), 40);
    assert_eq!(v.scroll_to_index_offset(11, Align::Auto), 40);
    // Below: align to the end. Above: align to the start.
    assert_eq!(v.scroll_to_index_offset(12, Align::Auto), 42);
    assert_eq!(v.scroll_to_index_offset(5, Align::Auto), 20);

    v.scroll_to_index(50, Align::Start);
    assert_eq!(v.visible_range().start, 50);
}

#[test]
fn test_auto_align_oversized_item_shows_its_start() {
    let mut v = fixed(10, 4);
    v.set_viewport_size(6);
    v.measure(3, 20);
    v.set_scroll_offset(0);
    assert_eq!(v.scroll_to_index_offset(3, Align::Auto), 12);
}

#[test]
fn test_scroll_by_clamps() {
    let mut v = fixed(10, 1);
    v.set_viewport_size(4);
    v.scroll_by(-5);
    assert_eq!(v.scroll_offset(), 0);
    v.scroll_by(3);
    assert_eq!(v.scroll_offset(), 3);
    v.scroll_by(100);
    assert_eq!(v.scroll_offset(), 6);
    assert_eq!(v.max_scroll_offset(), 6);
}

proptest! {
    #[test]
    fn prop_layout_is_contiguous(
        sizes in prop::collection::vec(1usize..12, 0..200),
        gap in 0usize..3,
    ) {
        let estimates = sizes.clone();
        let v = Virtualizer::new(
            VirtualizerOptions::new(sizes.len(), move |i| estimates[i]).with_gap(gap),
        );
        for pair in v.measurements().windows(2) {
            prop_assert_eq!(pair[1].start, pair[0].end + gap);
        }
        for m in v.measurements() {
            prop_assert_eq!(m.end, m.start + m.size);
        }
    }

    #[test]
    fn prop_range_covers_viewport(
        sizes in prop::collection::vec(1usize..12, 1..200),
        viewport in 1usize..60,
        offset in 0usize..3000,
        overscan in 0usize..6,
    ) {
        let estimates = sizes.clone();
        let mut v = Virtualizer::new(
            VirtualizerOptions::new(sizes.len(), move |i| estimates[i]).with_overscan(overscan),
        );
        v.set_viewport_size(viewport);
        v.set_scroll_offset(offset);
        prop_assert!(v.scroll_offset() <= v.max_scroll_offset());

        let visible = v.visible_range();
        let range = v.range();
        prop_assert!(!visible.is_empty());
        prop_assert!(range.start <= visible.start && visible.end <= range.end);
        prop_assert!(range.end <= sizes.len());

        let view_start = v.scroll_offset();
        let view_end = view_start + viewport;
        // Every visible item intersects the viewport.
        for m in &v.measurements()[visible.clone()] {
            prop_assert!(m.start < view_end && m.end > view_start);
        }
        // Nothing outside the visible range intersects it.
        for m in v.measurements() {
            if !visible.contains(&m.index) {
                prop_assert!(m.end <= view_start || m.start >= view_end);
            }
        }
    }

    #[test]
    fn prop_measuring_above_keeps_anchor(
        count in 20usize..100,
        offset in 0usize..200,
        resized in 0usize..20,
        size in 1usize..15,
    ) {
        let mut v = fixed(count, 4);
        v.set_viewport_size(10);
        v.set_scroll_offset(offset);
        let anchor = v.visible_range().start;
        let anchor_delta = v.scroll_offset() as isize - v.item(anchor).map(|i| i.start).unwrap_or(0) as isize;
        v.measure(resized, size);
        if resized < anchor && !v.at_bottom() {
            let start = v.item(anchor).map(|i| i.start).unwrap_or(0) as isize;
            prop_assert_eq!(v.scroll_offset() as isize - start, anchor_delta);
        }
        prop_assert!(v.scroll_offset() <= v.max_scroll_offset());
    }
}
