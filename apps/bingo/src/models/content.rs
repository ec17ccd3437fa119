use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// The payload of a cell. Wire form: `{"type": "text"|"image", "content": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellValue {
    Text { content: String },
    /// `content` is a data-URI (`data:image/png;base64,...`).
    Image { content: String },
}

/// A single unit of cell content. `id` is assigned once and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    #[serde(flatten)]
    pub value: CellValue,
}

impl ContentItem {
    /// Returns `None` for empty text: an empty cell is absence, not an empty item.
    pub fn text(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            value: CellValue::Text { content },
        })
    }

    pub fn image(data_uri: impl Into<String>) -> Option<Self> {
        let content = data_uri.into();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            value: CellValue::Image { content },
        })
    }

    /// Encodes raw image bytes as a base64 data-URI item.
    pub fn image_from_bytes(bytes: &[u8], media_type: &str) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Self::image(format!("data:{media_type};base64,{}", STANDARD.encode(bytes)))
    }

    /// Reads an image file and wraps it as an item. Non-image files are rejected.
    pub fn image_from_path(path: &Path) -> Result<Self, AppError> {
        let media_type = media_type_for_path(path).ok_or_else(|| {
            AppError::Validation(format!("'{}' is not a supported image file", path.display()))
        })?;
        let bytes = std::fs::read(path)?;
        Self::image_from_bytes(&bytes, media_type)
            .ok_or_else(|| AppError::Validation(format!("'{}' is empty", path.display())))
    }

    /// The raw value used for content-equality (dedup and pin exclusion).
    pub fn content_key(&self) -> &str {
        match &self.value {
            CellValue::Text { content } | CellValue::Image { content } => content,
        }
    }

    #[cfg(test)]
    pub fn is_image(&self) -> bool {
        matches!(self.value, CellValue::Image { .. })
    }

    /// Replaces the text while keeping the item's identity.
    /// Empty text removes the item.
    pub fn with_text(self, content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            id: self.id,
            value: CellValue::Text { content },
        })
    }

    /// Short human-readable label for listings.
    pub fn label(&self) -> String {
        match &self.value {
            CellValue::Text { content } => content.clone(),
            CellValue::Image { content } => {
                let mime = content
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .unwrap_or("image");
                format!("[{mime}, {} bytes]", content.len())
            }
        }
    }
}

/// Maps a file extension to an image MIME type.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
