use std::fmt::Write as _;

use tracing::info;

use crate::cli::GenerateArgs;
use crate::commands::RunContext;
use crate::errors::AppError;
use crate::generation::generator::{generate_cards, make_rng};
use crate::render::export::export_cards;
use crate::render::print::render_print_layout;
use crate::render::svg::SvgCardRenderer;
use crate::session::SessionStore;

/// `generate`: allocates cards, then writes whichever outputs were requested.
/// With no output flag the print layout goes to `<session stem>.print.html`.
pub async fn generate(
    store: &SessionStore,
    args: &GenerateArgs,
    ctx: &RunContext,
) -> Result<String, AppError> {
    let mut rng = make_rng(ctx.seed);
    let cards = generate_cards(store, &mut rng)?;
    let settings = store.settings();

    let mut out = String::new();

    if args.json {
        let json = serde_json::to_string_pretty(&cards)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        let _ = writeln!(out, "{json}");
    }

    let print_path = match (&args.print, &args.export, args.json) {
        (Some(path), _, _) => Some(path.clone()),
        (None, None, false) => Some(ctx.session_path.with_extension("print.html")),
        _ => None,
    };
    if let Some(path) = print_path {
        std::fs::write(&path, render_print_layout(&cards, &settings))?;
        info!("Wrote print layout for {} cards to {}", cards.len(), path.display());
        let _ = writeln!(out, "Print layout: {} ({} cards)", path.display(), cards.len());
    }

    if let Some(path) = &args.export {
        let prefix = args.prefix.as_deref().unwrap_or(&ctx.archive_prefix);
        let report = export_cards(&SvgCardRenderer, &cards, &settings, prefix, |p| {
            info!("Processing card {} of {}", p.current, p.total);
        })
        .await?;
        std::fs::write(path, &report.archive)?;
        let _ = writeln!(
            out,
            "Archive: {} ({} images{})",
            path.display(),
            report.rendered,
            if report.skipped.is_empty() {
                String::new()
            } else {
                format!(", skipped cards {:?}", report.skipped)
            }
        );
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{BingoSettings, GridSize};
    use std::io::Cursor;
    use zip::ZipArchive;

    fn ready_store() -> SessionStore {
        let mut store = SessionStore::new(BingoSettings {
            grid_size: GridSize::Three,
            num_cards: 3,
            ..BingoSettings::default()
        });
        store.set_cell_text(4, "FREE").unwrap();
        store.append_words(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        store
    }

    fn ctx(dir: &std::path::Path) -> RunContext {
        RunContext {
            session_path: dir.join("session.json"),
            seed: Some(99),
            archive_prefix: "bingo_card_".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_writes_print_and_archive() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateArgs {
            print: Some(dir.path().join("cards.html")),
            export: Some(dir.path().join("cards.zip")),
            prefix: None,
            json: false,
        };
        let msg = generate(&ready_store(), &args, &ctx(dir.path())).await.unwrap();
        assert!(msg.contains("3 cards"));

        let html = std::fs::read_to_string(dir.path().join("cards.html")).unwrap();
        assert_eq!(html.matches(r#"<section class="page">"#).count(), 3);

        let bytes = std::fs::read(dir.path().join("cards.zip")).unwrap();
        let zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 3);
        assert!(zip.file_names().any(|n| n == "bingo_card_1.svg"));
    }

    #[tokio::test]
    async fn test_generate_defaults_to_print_layout_next_to_session() {
        let dir = tempfile::tempdir().unwrap();
        generate(&ready_store(), &GenerateArgs::default(), &ctx(dir.path()))
            .await
            .unwrap();
        assert!(dir.path().join("session.print.html").exists());
    }

    #[tokio::test]
    async fn test_generate_insufficient_pool_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(BingoSettings {
            grid_size: GridSize::Three,
            ..BingoSettings::default()
        });
        let args = GenerateArgs {
            print: Some(dir.path().join("cards.html")),
            ..GenerateArgs::default()
        };
        let err = generate(&store, &args, &ctx(dir.path())).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientPool { required: 9, available: 0, .. }));
        assert!(!dir.path().join("cards.html").exists());
    }
}
