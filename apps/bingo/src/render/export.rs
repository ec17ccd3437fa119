//! Batch export — renders each card and bundles the artifacts into one archive.
//!
//! Cards render strictly one after another with a yield between them. A card
//! whose render fails is logged and left out; the archive still holds the rest.

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::card::GeneratedCard;
use crate::models::settings::BingoSettings;
use crate::render::archive::bundle;
use crate::render::CardRenderer;

#[derive(Debug, Clone)]
pub struct ExportReport {
    pub archive: Bytes,
    pub rendered: usize,
    /// 1-based indices of cards whose render failed.
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    pub current: usize,
    pub total: usize,
}

/// Archive entry name for the card at 1-based `index`.
pub fn entry_name(prefix: &str, index: usize, extension: &str) -> String {
    format!("{prefix}{index}.{extension}")
}

pub async fn export_cards<F>(
    renderer: &dyn CardRenderer,
    cards: &[GeneratedCard],
    settings: &BingoSettings,
    prefix: &str,
    mut on_progress: F,
) -> Result<ExportReport, AppError>
where
    F: FnMut(ExportProgress),
{
    let total = cards.len();
    let mut entries: Vec<(String, Bytes)> = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (i, card) in cards.iter().enumerate() {
        let index = i + 1;
        on_progress(ExportProgress {
            current: index,
            total,
        });

        match renderer.render(card, settings).await {
            Ok(artifact) => {
                entries.push((
                    entry_name(prefix, index, renderer.file_extension()),
                    artifact,
                ));
            }
            Err(e) => {
                warn!("Failed to render card {index}/{total}, skipping: {e}");
                skipped.push(index);
            }
        }

        // Hand control back between cards before the next render begins.
        tokio::task::yield_now().await;
    }

    let rendered = entries.len();
    let archive = tokio::task::spawn_blocking(move || bundle(&entries))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("archive task failed: {e}")))??;

    info!(
        "Exported {rendered}/{total} cards ({} skipped, {} bytes)",
        skipped.len(),
        archive.len()
    );

    Ok(ExportReport {
        archive,
        rendered,
        skipped,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
