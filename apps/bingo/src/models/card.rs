use serde::Serialize;

use crate::models::content::ContentItem;
use crate::models::settings::GridSize;

/// One fully populated card layout produced by an allocation run.
/// Immutable once built; a new run replaces every previous card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCard {
    size: GridSize,
    cells: Vec<Option<ContentItem>>,
}

impl GeneratedCard {
    pub(crate) fn new(size: GridSize, cells: Vec<Option<ContentItem>>) -> Self {
        debug_assert_eq!(cells.len(), size.cell_count());
        Self { size, cells }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cells(&self) -> &[Option<ContentItem>] {
        &self.cells
    }
}
