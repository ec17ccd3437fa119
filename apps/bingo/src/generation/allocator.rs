//! Card Allocator — turns a content pool into N independently shuffled cards.
//!
//! Every card reshuffles the full pool (Fisher–Yates via `SliceRandom::shuffle`),
//! so an item may appear on many cards but never twice on one card.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::AppError;
use crate::generation::pool::ContentPool;
use crate::models::card::GeneratedCard;
use crate::models::content::ContentItem;
use crate::models::settings::GridSize;

/// Number of pool items one card consumes.
pub fn required_items(size: GridSize, pinned: bool) -> usize {
    size.cell_count() - usize::from(pinned)
}

/// Allocates `card_count` cards from `pool`.
///
/// Fails with `InsufficientPool` before producing anything if the pool cannot
/// fill a single card. The pinned item, when present, lands on the geometric
/// center of every card; every other slot takes the next item of that card's
/// shuffled sequence in index order.
pub fn allocate<R: Rng + ?Sized>(
    pool: &ContentPool,
    size: GridSize,
    card_count: usize,
    rng: &mut R,
) -> Result<Vec<GeneratedCard>, AppError> {
    let center = size.center_index();
    // A pin without an exact center cannot be placed.
    let pinned = pool.pinned.as_ref().filter(|_| center.is_some());
    let required = required_items(size, pinned.is_some());

    if pool.items.len() < required {
        return Err(AppError::InsufficientPool {
            required,
            available: pool.items.len(),
            center_pinned: pinned.is_some(),
        });
    }

    let mut cards = Vec::with_capacity(card_count);
    let mut shuffled: Vec<&ContentItem> = pool.items.iter().collect();

    for _ in 0..card_count {
        shuffled.shuffle(rng);
        let mut drawn = shuffled[..required].iter().copied();

        let cells: Vec<Option<ContentItem>> = (0..size.cell_count())
            .map(|idx| match pinned {
                Some(pin) if Some(idx) == center => Some(pin.clone()),
                _ => drawn.next().cloned(),
            })
            .collect();

        cards.push(GeneratedCard::new(size, cells));
    }

    Ok(cards)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
