//! Generated fixture data for the demo.
//!
//! Every item is derived from `(seed, index)` alone, so growing the item
//! count keeps the existing items unchanged and the expanded-card details
//! are the same every time a card is opened.

pub mod faker;

pub use faker::Faker;

use std::time::Instant;

/// Card accent colors, cycled by index.
pub const PALETTE: [&str; 8] = [
    "#3B82F6", // Blue
    "#14B8A6", // Teal
    "#F97316", // Orange
    "#8B5CF6", // Purple
    "#EC4899", // Pink
    "#10B981", // Emerald
    "#EF4444", // Red
    "#F59E0B", // Amber
];

/// One generated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// 1-based identifier, stable across count changes.
    pub id: u64,
    /// Product-like name.
    pub title: String,
    /// One to three lorem sentences.
    pub description: String,
    /// Placeholder image URL.
    pub image: String,
    /// Accent color as `#RRGGBB`.
    pub color: &'static str,
}

fn item_seed(seed: u64, index: u64) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ index.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

/// Builds the item at `index`.
pub fn generate_item(seed: u64, index: usize) -> Item {
    let mut faker = Faker::seeded(item_seed(seed, index as u64));
    Item {
        id: index as u64 + 1,
        title: faker.product_name(),
        description: faker.description(),
        image: format!("https://picsum.photos/seed/{}/200/200", index),
        color: PALETTE[index % PALETTE.len()],
    }
}

/// Builds `count` items.
pub fn generate_items(count: usize, seed: u64) -> Vec<Item> {
    let started = Instant::now();
    let items: Vec<Item> = (0..count).map(|i| generate_item(seed, i)).collect();
    tracing::debug!(count, seed, elapsed = ?started.elapsed(), "generated items");
    items
}

/// The "Additional Details" paragraph of an expanded card.
pub fn details(seed: u64, id: u64, sentences: usize) -> String {
    let mut faker = Faker::seeded(item_seed(seed, id).rotate_left(17) ^ sentences as u64);
    faker.paragraph(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_fields() {
        let items = generate_items(10, 42);
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[9].id, 10);
        assert_eq!(items[3].image, "https://picsum.photos/seed/3/200/200");
        assert_eq!(items[0].color, PALETTE[0]);
        assert_eq!(items[8 % 10].color, PALETTE[0]);
        assert_eq!(items[9].color, PALETTE[1]);
        assert!(items.iter().all(|i| !i.title.is_empty() && !i.description.is_empty()));
    }

    #[test]
    fn test_growing_count_keeps_prefix() {
        let small = generate_items(50, 5);
        let large = generate_items(200, 5);
        assert_eq!(&large[..50], &small[..]);
    }

    #[test]
    fn test_seed_changes_content() {
        let a = generate_items(20, 1);
        let b = generate_items(20, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_details_are_stable() {
        assert_eq!(details(42, 7, 3), details(42, 7, 3));
        assert!(!details(42, 7, 2).is_empty());
        assert_eq!(details(42, 7, 0), "");
    }
}
