//! Card generation — orchestrates one generation run over the current session.
//!
//! Flow: session snapshot → build_pool → allocate → cards.
//! Nothing is written back to the session; a failed run leaves it as it was.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::allocator::allocate;
use crate::generation::pool::build_pool;
use crate::models::card::GeneratedCard;
use crate::session::store::SessionStore;

/// Seeded when a seed is given, entropy-backed otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("Using seeded RNG (seed={seed})");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Generates `settings.num_cards` cards from the session's grid + extras.
pub fn generate_cards<R: Rng + ?Sized>(
    store: &SessionStore,
    rng: &mut R,
) -> Result<Vec<GeneratedCard>, AppError> {
    let settings = store.settings();
    let grid = store.grid();
    let extras = store.extras();

    let size = settings.grid_size;
    let pin = settings.pin_active();
    let pool = build_pool(&grid, &extras, pin, size.center_index());

    if pin && pool.pinned.is_none() {
        warn!("Center cell is pinned but empty; the center will draw from the pool");
    }
    info!(
        "Built pool: {} unique items, pinned={}",
        pool.items.len(),
        pool.pinned.is_some()
    );

    let cards = allocate(&pool, size, settings.num_cards as usize, rng)?;
    info!("Generated {} {} cards", cards.len(), size);
    Ok(cards)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
