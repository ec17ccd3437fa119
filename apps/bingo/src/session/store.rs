//! Session State Store — settings, template grid and extra items.
//!
//! Collections are never edited in place: each mutation builds a new collection
//! and swaps it in, so a snapshot handed to a reader stays valid and consistent.

use std::sync::Arc;

use tracing::debug;

use crate::errors::AppError;
use crate::models::content::ContentItem;
use crate::models::settings::{BingoSettings, GridSize};
use crate::session::persistence::SessionSnapshot;

pub type Slots = Arc<[Option<ContentItem>]>;

#[derive(Debug, Clone)]
pub struct SessionStore {
    settings: Arc<BingoSettings>,
    grid: Slots,
    extras: Slots,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(BingoSettings::default())
    }
}

fn empty_grid(size: GridSize) -> Slots {
    vec![None; size.cell_count()].into()
}

/// Reconciles settings after a grid size change. Even grids cannot pin.
fn normalize_for_size(mut settings: BingoSettings) -> BingoSettings {
    if !settings.grid_size.is_odd() {
        settings.is_center_cell_free = false;
    }
    settings
}

impl SessionStore {
    pub fn new(settings: BingoSettings) -> Self {
        let settings = normalize_for_size(settings);
        let grid = empty_grid(settings.grid_size);
        Self {
            settings: Arc::new(settings),
            grid,
            extras: Arc::from(Vec::new()),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn settings(&self) -> Arc<BingoSettings> {
        Arc::clone(&self.settings)
    }

    pub fn grid(&self) -> Slots {
        Arc::clone(&self.grid)
    }

    pub fn extras(&self) -> Slots {
        Arc::clone(&self.extras)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            (*self.settings).clone(),
            self.grid.to_vec(),
            self.extras.to_vec(),
        )
    }

    // ── Settings ────────────────────────────────────────────────────────────

    /// Replaces the settings. A size change discards the grid for a fresh
    /// all-absent one, and an even size forces pinning off.
    pub fn replace_settings(&mut self, new: BingoSettings) -> Result<(), AppError> {
        new.validate()?;
        let size_changed = new.grid_size != self.settings.grid_size;
        let new = normalize_for_size(new);
        if size_changed {
            debug!(
                from = %self.settings.grid_size,
                to = %new.grid_size,
                "Grid size changed, resetting template"
            );
            self.grid = empty_grid(new.grid_size);
        }
        self.settings = Arc::new(new);
        Ok(())
    }

    // ── Template grid ───────────────────────────────────────────────────────

    pub fn replace_grid(&mut self, cells: Vec<Option<ContentItem>>) -> Result<(), AppError> {
        let expected = self.settings.grid_size.cell_count();
        if cells.len() != expected {
            return Err(AppError::Validation(format!(
                "grid content must have {expected} slots for a {} grid (got {})",
                self.settings.grid_size,
                cells.len()
            )));
        }
        self.grid = cells.into();
        Ok(())
    }

    pub fn set_cell(&mut self, index: usize, item: Option<ContentItem>) -> Result<(), AppError> {
        let len = self.grid.len();
        if index >= len {
            return Err(AppError::Validation(format!(
                "cell index {index} is out of range (grid has {len} cells)"
            )));
        }
        let mut cells = self.grid.to_vec();
        cells[index] = item;
        self.grid = cells.into();
        Ok(())
    }

    /// Empty text clears the cell. Every text edit mints a fresh item.
    pub fn set_cell_text(&mut self, index: usize, text: &str) -> Result<(), AppError> {
        self.set_cell(index, ContentItem::text(text))
    }

    pub fn clear_grid(&mut self) {
        self.grid = empty_grid(self.settings.grid_size);
    }

    // ── Extra items ─────────────────────────────────────────────────────────

    pub fn replace_extras(&mut self, items: Vec<Option<ContentItem>>) {
        self.extras = items.into();
    }

    /// Appends an absent slot for the user to fill.
    pub fn add_extra_slot(&mut self) {
        let mut items = self.extras.to_vec();
        items.push(None);
        self.extras = items.into();
    }

    /// Sets one slot, then drops every absent slot from the list.
    pub fn set_extra(&mut self, index: usize, item: Option<ContentItem>) -> Result<(), AppError> {
        let mut items = self.extras.to_vec();
        let slot = items.get_mut(index).ok_or_else(|| extra_out_of_range(index, self.extras.len()))?;
        *slot = item;
        items.retain(Option::is_some);
        self.extras = items.into();
        Ok(())
    }

    /// Edits a slot's text, keeping the existing id when there is one.
    pub fn set_extra_text(&mut self, index: usize, text: &str) -> Result<(), AppError> {
        let current = self
            .extras
            .get(index)
            .ok_or_else(|| extra_out_of_range(index, self.extras.len()))?
            .clone();
        let next = match current {
            Some(item) => item.with_text(text),
            None => ContentItem::text(text),
        };
        self.set_extra(index, next)
    }

    pub fn remove_extra(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.extras.len() {
            return Err(extra_out_of_range(index, self.extras.len()));
        }
        let items: Vec<_> = self
            .extras
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        self.extras = items.into();
        Ok(())
    }

    pub fn clear_extras(&mut self) {
        self.extras = Arc::from(Vec::new());
    }

    /// Appends one new text item per word, after dropping absent slots.
    /// Returns how many were added.
    pub fn append_words<S: AsRef<str>>(&mut self, words: &[S]) -> usize {
        let mut items: Vec<_> = self.extras.iter().filter(|i| i.is_some()).cloned().collect();
        let before = items.len();
        items.extend(words.iter().filter_map(|w| ContentItem::text(w.as_ref())).map(Some));
        let added = items.len() - before;
        self.extras = items.into();
        added
    }

    // ── Load ────────────────────────────────────────────────────────────────

    /// Replaces all three collections at once. The snapshot is validated first;
    /// on error nothing changes.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), AppError> {
        snapshot.validate()?;
        let SessionSnapshot {
            settings,
            main_grid_content,
            extra_items,
            ..
        } = snapshot;
        let mut next = SessionStore::new(settings);
        next.replace_grid(main_grid_content)?;
        next.replace_extras(extra_items);
        *self = next;
        Ok(())
    }
}

fn extra_out_of_range(index: usize, len: usize) -> AppError {
    AppError::Validation(format!(
        "extra item index {index} is out of range ({len} extra items)"
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
