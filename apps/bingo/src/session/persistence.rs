//! Save slot — serializes the whole session to one JSON record on disk.
//!
//! Writes go to a temp file in the target directory and are renamed into place,
//! so a failed save never leaves a half-written slot behind.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::content::ContentItem;
use crate::models::settings::BingoSettings;

/// Default save slot name.
pub const SAVE_KEY: &str = "bingoGeneratorState";

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub settings: BingoSettings,
    pub main_grid_content: Vec<Option<ContentItem>>,
    pub extra_items: Vec<Option<ContentItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn new(
        settings: BingoSettings,
        main_grid_content: Vec<Option<ContentItem>>,
        extra_items: Vec<Option<ContentItem>>,
    ) -> Self {
        Self {
            settings,
            main_grid_content,
            extra_items,
            saved_at: None,
        }
    }

    /// Structural checks that JSON parsing alone cannot enforce.
    pub fn validate(&self) -> Result<(), AppError> {
        self.settings
            .validate()
            .map_err(|e| AppError::Deserialization(e.to_string()))?;

        let expected = self.settings.grid_size.cell_count();
        if self.main_grid_content.len() != expected {
            return Err(AppError::Deserialization(format!(
                "mainGridContent has {} slots, expected {expected} for a {} grid",
                self.main_grid_content.len(),
                self.settings.grid_size
            )));
        }

        let has_empty = self
            .main_grid_content
            .iter()
            .chain(self.extra_items.iter())
            .flatten()
            .any(|item| item.content_key().is_empty());
        if has_empty {
            return Err(AppError::Deserialization(
                "content items must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn to_json(snapshot: &SessionSnapshot) -> Result<String, AppError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| AppError::Serialization(e.to_string()))
}

pub fn from_json(raw: &str) -> Result<SessionSnapshot, AppError> {
    let snapshot: SessionSnapshot =
        serde_json::from_str(raw).map_err(|e| AppError::Deserialization(e.to_string()))?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Writes `snapshot` to `path`, stamping `savedAt`.
pub fn save_session(path: &Path, snapshot: &SessionSnapshot) -> Result<(), AppError> {
    let stamped = SessionSnapshot {
        saved_at: Some(Utc::now()),
        ..snapshot.clone()
    };
    let json = to_json(&stamped)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| AppError::Serialization(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| AppError::Serialization(e.error.to_string()))?;

    info!(
        "Saved session to {} ({} grid cells, {} extra items)",
        path.display(),
        stamped.main_grid_content.len(),
        stamped.extra_items.len()
    );
    Ok(())
}

/// Reads and validates the slot at `path`.
/// A missing slot is `NotFound`, anything unreadable is `Deserialization`.
pub fn load_session(path: &Path) -> Result<SessionSnapshot, AppError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "No saved session was found at {}",
                path.display()
            )));
        }
        Err(e) => return Err(AppError::Deserialization(e.to_string())),
    };
    let snapshot = from_json(&raw)?;
    info!("Loaded session from {}", path.display());
    Ok(snapshot)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::GridSize;
    use crate::session::store::SessionStore;
    use serde_json::json;

    fn sample_store() -> SessionStore {
        let mut store = SessionStore::default();
        store.set_cell_text(0, "A").unwrap();
        store.set_cell(1, ContentItem::image("data:image/png;base64,AAAA")).unwrap();
        store.append_words(&["x", "y"]);
        store
    }

    #[test]
    fn test_snapshot_uses_three_named_fields() {
        let value = serde_json::to_value(sample_store().snapshot()).unwrap();
        assert!(value.get("settings").is_some());
        assert_eq!(value["mainGridContent"].as_array().unwrap().len(), 25);
        assert_eq!(value["mainGridContent"][2], json!(null));
        assert_eq!(value["extraItems"].as_array().unwrap().len(), 2);
        assert!(value.get("savedAt").is_none());
    }

    #[test]
    fn test_save_then_load_restores_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.json");
        let store = sample_store();

        save_session(&path, &store.snapshot()).unwrap();
        let loaded = load_session(&path).unwrap();

        assert!(loaded.saved_at.is_some());
        assert_eq!(loaded.main_grid_content, store.snapshot().main_grid_content);
        assert_eq!(loaded.extra_items, store.snapshot().extra_items);
    }

    #[test]
    fn test_loads_record_without_saved_at() {
        let raw = json!({
            "settings": {
                "title": "Party",
                "gridSize": 3,
                "numCards": 4,
                "bgColor": "#FFFFFF",
                "textColor": "#000000",
                "lineColor": "#000000",
                "lineThickness": "thick",
                "isCenterCellFree": false
            },
            "mainGridContent": [null, null, null, null, null, null, null, null, null],
            "extraItems": [{"id": "0b9f0f6e-29c3-4a8e-9d0c-3f7f2d0d6a11", "type": "text", "content": "cake"}]
        });
        let snapshot = from_json(&raw.to_string()).unwrap();
        assert_eq!(snapshot.settings.grid_size, GridSize::Three);
        assert_eq!(snapshot.extra_items.len(), 1);
    }

    #[test]
    fn test_missing_slot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_session(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_slot_is_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_session(&path), Err(AppError::Deserialization(_))));
    }

    #[test]
    fn test_grid_length_mismatch_rejected() {
        let mut snapshot = sample_store().snapshot();
        snapshot.main_grid_content.truncate(9);
        let raw = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(from_json(&raw), Err(AppError::Deserialization(_))));
    }

    #[test]
    fn test_empty_content_item_rejected() {
        let mut raw = serde_json::to_value(sample_store().snapshot()).unwrap();
        raw["extraItems"][0]["content"] = json!("");
        assert!(from_json(&raw.to_string()).is_err());
    }

    #[test]
    fn test_failed_restore_leaves_store_untouched() {
        let mut store = sample_store();
        let before = store.snapshot();
        let mut bad = before.clone();
        bad.main_grid_content.pop();

        assert!(store.restore(bad).is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_restore_replaces_everything() {
        let mut store = sample_store();
        let other = SessionSnapshot::new(
            BingoSettings {
                grid_size: GridSize::Three,
                ..BingoSettings::default()
            },
            vec![None; 9],
            vec![],
        );
        store.restore(other).unwrap();
        assert_eq!(store.grid().len(), 9);
        assert!(store.extras().is_empty());
    }
}
