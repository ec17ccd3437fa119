//! Content Pool — merges the template grid and the extra items into the candidate
//! set that card allocation draws from.
//!
//! Equality here is content equality: two items with the same text (or the same
//! image payload) are one pool entry, whatever their ids.

use std::collections::HashSet;

use crate::models::content::ContentItem;

/// Deduplicated candidate pool plus the item pinned to every card's center.
#[derive(Debug, Clone, Default)]
pub struct ContentPool {
    pub items: Vec<ContentItem>,
    pub pinned: Option<ContentItem>,
}

/// Builds the pool for one generation run.
///
/// 1. Concatenate present grid slots, then present extra slots
/// 2. Keep the first item for each distinct `content_key()`
/// 3. If pinning and the grid center holds an item, pin it and drop every pool
///    entry with the same content
pub fn build_pool(
    grid: &[Option<ContentItem>],
    extras: &[Option<ContentItem>],
    center_pinned: bool,
    center_index: Option<usize>,
) -> ContentPool {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items: Vec<ContentItem> = grid
        .iter()
        .chain(extras.iter())
        .flatten()
        .filter(|item| seen.insert(item.content_key()))
        .cloned()
        .collect();

    let pinned = if center_pinned {
        center_index
            .and_then(|idx| grid.get(idx))
            .and_then(|slot| slot.clone())
    } else {
        None
    };

    if let Some(pin) = &pinned {
        items.retain(|item| item.content_key() != pin.content_key());
    }

    ContentPool { items, pinned }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<ContentItem> {
        ContentItem::text(s)
    }

    fn keys(pool: &ContentPool) -> Vec<&str> {
        pool.items.iter().map(|i| i.content_key()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let grid = vec![text("A"), None, text("B"), text("A")];
        let extras = vec![text("C"), text("B"), None, text("D")];
        let pool = build_pool(&grid, &extras, false, None);
        assert_eq!(keys(&pool), vec!["A", "B", "C", "D"]);
        assert_eq!(pool.items[0].id, grid[0].as_ref().unwrap().id, "first A must win");
    }

    #[test]
    fn test_dedup_is_by_content_not_identity() {
        let a1 = text("same");
        let a2 = text("same");
        assert_ne!(a1.as_ref().unwrap().id, a2.as_ref().unwrap().id);
        let pool = build_pool(&[a1], &[a2], false, None);
        assert_eq!(pool.items.len(), 1);
    }

    #[test]
    fn test_identical_image_payloads_collapse() {
        let img1 = ContentItem::image("data:image/png;base64,AAAA");
        let img2 = ContentItem::image("data:image/png;base64,AAAA");
        let pool = build_pool(&[img1], &[img2], false, None);
        assert_eq!(pool.items.len(), 1);
    }

    #[test]
    fn test_pinned_center_is_excluded_by_value() {
        let mut grid: Vec<_> = (0..9).map(|_| None).collect();
        grid[4] = text("X");
        grid[0] = text("A");
        let extras = vec![text("X"), text("B")];
        let pool = build_pool(&grid, &extras, true, Some(4));

        assert_eq!(pool.pinned.as_ref().map(|p| p.content_key()), Some("X"));
        assert_eq!(keys(&pool), vec!["A", "B"], "X must not remain in the pool");
    }

    #[test]
    fn test_empty_center_means_no_pin() {
        let mut grid: Vec<_> = (0..9).map(|_| None).collect();
        grid[0] = text("A");
        let pool = build_pool(&grid, &[], true, Some(4));
        assert!(pool.pinned.is_none());
        assert_eq!(keys(&pool), vec!["A"]);
    }

    #[test]
    fn test_center_stays_in_pool_when_not_pinned() {
        let mut grid: Vec<_> = (0..9).map(|_| None).collect();
        grid[4] = text("X");
        let pool = build_pool(&grid, &[], false, Some(4));
        assert!(pool.pinned.is_none());
        assert_eq!(keys(&pool), vec!["X"]);
    }
}
