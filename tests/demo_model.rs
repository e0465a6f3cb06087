//! Drives the demo through the bubbletea message interface.

use bubbletea_rs::{KeyMsg, Model, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use virtual_scroll_demo::prelude::*;

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn resize(width: u16, height: u16) -> Msg {
    Box::new(WindowSizeMsg { width, height })
}

fn plain(demo: &Demo) -> String {
    strip_ansi_escapes::strip_str(Model::view(demo))
}

fn demo(count: usize) -> Demo {
    Demo::new(
        Settings {
            count,
            ..Settings::default()
        },
        100,
        30,
    )
}

#[test]
fn screen_fills_the_terminal_after_resize() {
    let mut d = demo(2_000);
    assert_eq!(plain(&d).lines().count(), 30);

    d.update(resize(140, 40));
    assert_eq!(plain(&d).lines().count(), 40);
    assert_eq!(d.grid().columns(), 3);

    d.update(resize(70, 20));
    assert_eq!(plain(&d).lines().count(), 20);
    assert_eq!(d.grid().columns(), 1);
}

#[test]
fn rendering_stays_bounded_for_large_counts() {
    let d = demo(50_000);
    assert!(d.status_line().starts_with("Showing 50,000 items"));
    // Viewport of ~25 rows and overscan 10.
    assert!(d.list().rendered_count() <= 25);
    assert!(d.list().virtualizer().total_size() >= 50_000 * 3);
}

#[test]
fn jumping_to_the_end_renders_the_last_items() {
    let mut d = demo(5_000);
    d.update(key(KeyCode::End));
    assert_eq!(d.list().cursor(), 4_999);
    assert!(d.list().virtualizer().at_bottom());
    let last = d.catalog().get(4_999).map(|i| i.id).expect("last item");
    assert!(plain(&d).contains(&last.to_string()));

    d.update(key(KeyCode::Home));
    assert_eq!(d.list().cursor(), 0);
    assert!(d.list().virtualizer().at_top());
}

#[test]
fn expanded_card_is_remembered_after_scrolling_away() {
    let mut d = demo(1_000);
    d.update(key(KeyCode::Down));
    d.update(key(KeyCode::Enter));
    let id = d.catalog().get(1).map(|i| i.id).expect("item");
    assert!(d.list().is_expanded(id));

    for _ in 0..5 {
        d.update(key(KeyCode::PageDown));
    }
    assert!(d.list().cursor() > 10);
    d.update(key(KeyCode::Char('g')));
    assert!(d.list().is_expanded(id));
    assert!(plain(&d).contains("Additional Details"));
}

#[test]
fn search_and_sort_compose() {
    let mut d = demo(3_000);
    d.update(key(KeyCode::Char('/')));
    for c in "pro".chars() {
        d.update(key(KeyCode::Char(c)));
    }
    d.update(key(KeyCode::Esc));
    let matched = d.filtered().len();
    assert!(matched > 0);
    assert!(matched < 3_000);

    d.update(key(KeyCode::Char('s')));
    d.update(key(KeyCode::Char('s')));
    assert_eq!(d.sort(), Some(SortDirection::Desc));
    assert_eq!(d.filtered().len(), matched);
    let first = d.filtered()[0];
    let last = d.filtered()[matched - 1];
    let title = |i: usize| d.catalog().get(i).map(|it| it.title.to_lowercase());
    assert!(title(first) >= title(last));
}

#[test]
fn unknown_messages_are_ignored() {
    let mut d = demo(100);
    let before = plain(&d);
    assert!(d.update(Box::new(42u32)).is_none());
    assert_eq!(plain(&d), before);
}
