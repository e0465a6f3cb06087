//! Search and sort over the generated items.
//!
//! The catalog keeps lowercase copies of every title and description so a
//! keystroke in the search box costs one substring scan per item and no
//! allocation per comparison.

use crate::data::Item;
use std::cmp::Ordering;
use std::time::Instant;

/// Title sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// A to Z.
    Asc,
    /// Z to A.
    Desc,
}

/// Cycles unsorted, ascending, descending, unsorted.
pub fn next_sort(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

/// Items plus their search haystacks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    titles: Vec<String>,
    descriptions: Vec<String>,
}

impl Catalog {
    /// Indexes `items`.
    pub fn new(items: Vec<Item>) -> Self {
        let titles = items.iter().map(|i| i.title.to_lowercase()).collect();
        let descriptions = items.iter().map(|i| i.description.to_lowercase()).collect();
        Self {
            items,
            titles,
            descriptions,
        }
    }

    /// All items in generation order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item at a catalog index.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog indices matching `search`, ordered by `sort`.
    ///
    /// Matching is a case-insensitive substring test against title or
    /// description; an empty search matches everything. Sorting is stable,
    /// so equal titles keep generation order.
    pub fn query(&self, search: &str, sort: Option<SortDirection>) -> Vec<usize> {
        let started = Instant::now();
        let needle = search.to_lowercase();
        let mut indices: Vec<usize> = if needle.is_empty() {
            (0..self.items.len()).collect()
        } else {
            (0..self.items.len())
                .filter(|&i| self.titles[i].contains(&needle) || self.descriptions[i].contains(&needle))
                .collect()
        };

        if let Some(direction) = sort {
            indices.sort_by(|&a, &b| {
                let ord = self.compare_titles(a, b);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        tracing::debug!(
            search,
            ?sort,
            matches = indices.len(),
            elapsed = ?started.elapsed(),
            "catalog query"
        );
        indices
    }

    fn compare_titles(&self, a: usize, b: usize) -> Ordering {
        self.titles[a]
            .cmp(&self.titles[b])
            .then_with(|| self.items[a].title.cmp(&self.items[b].title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, description: &str) -> Item {
        Item {
            id,
            title: title.to_string(),
            description: description.to_string(),
            image: String::new(),
            color: "#3B82F6",
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            item(1, "Smart Widget", "Lorem ipsum"),
            item(2, "compact Tool Pro", "Cras non diam"),
            item(3, "Ultra Device", "Nulla facilisi WIDGET"),
            item(4, "Smart Widget", "Integer vel"),
        ])
    }

    #[test]
    fn test_empty_search_matches_all_in_order() {
        assert_eq!(catalog().query("", None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        assert_eq!(catalog().query("widget", None), vec![0, 2, 3]);
        assert_eq!(catalog().query("DIAM", None), vec![1]);
        assert!(catalog().query("nothing here", None).is_empty());
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let c = catalog();
        let asc = c.query("", Some(SortDirection::Asc));
        let titles: Vec<&str> = asc.iter().map(|&i| c.items()[i].title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["compact Tool Pro", "Smart Widget", "Smart Widget", "Ultra Device"]
        );
        // Stable: equal titles keep generation order.
        assert_eq!(asc[1..3], [0, 3]);

        let desc = c.query("", Some(SortDirection::Desc));
        assert_eq!(desc[0], 2);
        assert_eq!(desc[3], 1);
    }

    #[test]
    fn test_sort_cycle() {
        let mut s = None;
        s = next_sort(s);
        assert_eq!(s, Some(SortDirection::Asc));
        s = next_sort(s);
        assert_eq!(s, Some(SortDirection::Desc));
        assert_eq!(next_sort(s), None);
    }
}
