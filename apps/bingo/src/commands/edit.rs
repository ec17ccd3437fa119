use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::cli::{CellCommand, Command, ContentArgs, ExtraCommand, SettingsArgs};
use crate::errors::AppError;
use crate::models::content::ContentItem;
use crate::models::settings::{BingoSettings, GridSize};
use crate::session::import::parse_word_list;
use crate::session::SessionStore;

/// Applies one editing command to the store. Returns the confirmation line.
pub fn apply(store: &mut SessionStore, command: Command) -> Result<String, AppError> {
    match command {
        Command::Settings(args) => apply_settings(store, args),
        Command::Cell(CellCommand::Set { index, content }) => {
            require_payload(&content)?;
            match &content.text {
                Some(text) if content.image.is_none() => store.set_cell_text(index, text)?,
                _ => store.set_cell(index, content_item(&content)?)?,
            }
            Ok(format!("Cell {index} updated"))
        }
        Command::Cell(CellCommand::Clear { index }) => {
            store.set_cell(index, None)?;
            Ok(format!("Cell {index} cleared"))
        }
        Command::ClearGrid => {
            store.clear_grid();
            Ok("Template grid cleared".to_string())
        }
        Command::Extra(cmd) => apply_extra(store, cmd),
        Command::Import { file } => {
            let text = read_word_list(&file)?;
            let words = parse_word_list(&text);
            let added = store.append_words(&words);
            info!("Imported {added} words from {}", file.display());
            Ok(format!("Added {added} words to the extra items"))
        }
        other => Err(AppError::Internal(anyhow::anyhow!(
            "{other:?} is not an editing command"
        ))),
    }
}

fn apply_settings(store: &mut SessionStore, args: SettingsArgs) -> Result<String, AppError> {
    let current = store.settings();
    let size_before = current.grid_size;

    let grid_size = match args.size {
        Some(raw) => GridSize::try_from(raw).map_err(AppError::Validation)?,
        None => current.grid_size,
    };
    let next = BingoSettings {
        title: args.title.unwrap_or_else(|| current.title.clone()),
        grid_size,
        num_cards: args.cards.unwrap_or(current.num_cards),
        bg_color: args.bg.unwrap_or_else(|| current.bg_color.clone()),
        text_color: args.text_color.unwrap_or_else(|| current.text_color.clone()),
        line_color: args.line_color.unwrap_or_else(|| current.line_color.clone()),
        line_thickness: args.thickness.unwrap_or(current.line_thickness),
        is_center_cell_free: args.pin.unwrap_or(current.is_center_cell_free),
    };
    if args.pin == Some(true) && !grid_size.is_odd() {
        return Err(AppError::Validation(format!(
            "a {grid_size} grid has no center cell to pin"
        )));
    }

    store.replace_settings(next)?;
    if grid_size != size_before {
        Ok(format!(
            "Settings updated; grid is now {grid_size} and the template was cleared"
        ))
    } else {
        Ok("Settings updated".to_string())
    }
}

fn apply_extra(store: &mut SessionStore, cmd: ExtraCommand) -> Result<String, AppError> {
    match cmd {
        ExtraCommand::Add { content } => match content_item(&content)? {
            Some(item) => {
                let mut items = store.extras().to_vec();
                items.push(Some(item));
                store.replace_extras(items);
                Ok("Extra item added".to_string())
            }
            None => {
                store.add_extra_slot();
                Ok(format!("Empty slot {} added", store.extras().len() - 1))
            }
        },
        ExtraCommand::Set { index, content } => {
            require_payload(&content)?;
            match (&content.text, &content.image) {
                (Some(text), None) => store.set_extra_text(index, text)?,
                _ => store.set_extra(index, content_item(&content)?)?,
            }
            Ok(format!("Extra item {index} updated"))
        }
        ExtraCommand::Remove { index } => {
            store.remove_extra(index)?;
            Ok(format!("Extra item {index} removed"))
        }
        ExtraCommand::Clear => {
            store.clear_extras();
            Ok("Extra items cleared".to_string())
        }
    }
}

/// `set` always needs a payload; only `extra add` takes an empty one.
fn require_payload(args: &ContentArgs) -> Result<(), AppError> {
    if args.text.is_none() && args.image.is_none() {
        return Err(AppError::Validation("provide --text or --image".to_string()));
    }
    Ok(())
}

/// `None` when neither payload is given or the text is empty.
fn content_item(args: &ContentArgs) -> Result<Option<ContentItem>, AppError> {
    match (&args.text, &args.image) {
        (_, Some(path)) => ContentItem::image_from_path(path).map(Some),
        (Some(text), None) => Ok(ContentItem::text(text.as_str())),
        (None, None) => Ok(None),
    }
}

fn read_word_list(file: &Path) -> Result<String, AppError> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::LineThickness;
    use std::path::PathBuf;

    fn text_args(text: &str) -> ContentArgs {
        ContentArgs {
            text: Some(text.to_string()),
            image: None,
        }
    }

    #[test]
    fn test_size_change_from_5_to_4_unpins_and_resets() {
        let mut store = SessionStore::default();
        store.set_cell_text(12, "FREE").unwrap();
        let msg = apply(
            &mut store,
            Command::Settings(SettingsArgs {
                size: Some(4),
                ..SettingsArgs::default()
            }),
        )
        .unwrap();

        assert!(msg.contains("cleared"));
        assert!(!store.settings().is_center_cell_free);
        assert_eq!(store.grid().len(), 16);
        assert!(store.grid().iter().all(Option::is_none));
    }

    #[test]
    fn test_pin_on_even_grid_rejected() {
        let mut store = SessionStore::default();
        apply(
            &mut store,
            Command::Settings(SettingsArgs {
                size: Some(4),
                ..SettingsArgs::default()
            }),
        )
        .unwrap();
        let err = apply(
            &mut store,
            Command::Settings(SettingsArgs {
                pin: Some(true),
                ..SettingsArgs::default()
            }),
        );
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_partial_settings_keep_other_fields() {
        let mut store = SessionStore::default();
        apply(
            &mut store,
            Command::Settings(SettingsArgs {
                thickness: Some(LineThickness::Thin),
                cards: Some(12),
                ..SettingsArgs::default()
            }),
        )
        .unwrap();
        let settings = store.settings();
        assert_eq!(settings.line_thickness, LineThickness::Thin);
        assert_eq!(settings.num_cards, 12);
        assert_eq!(settings.title, BingoSettings::default().title);
    }

    #[test]
    fn test_cell_set_and_clear() {
        let mut store = SessionStore::default();
        apply(
            &mut store,
            Command::Cell(CellCommand::Set {
                index: 2,
                content: text_args("hello"),
            }),
        )
        .unwrap();
        assert_eq!(store.grid()[2].as_ref().unwrap().content_key(), "hello");

        apply(&mut store, Command::Cell(CellCommand::Clear { index: 2 })).unwrap();
        assert!(store.grid()[2].is_none());
    }

    #[test]
    fn test_cell_set_with_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("star.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let mut store = SessionStore::default();
        apply(
            &mut store,
            Command::Cell(CellCommand::Set {
                index: 0,
                content: ContentArgs {
                    text: None,
                    image: Some(path),
                },
            }),
        )
        .unwrap();
        let item = store.grid()[0].clone().unwrap();
        assert!(item.is_image());
        assert!(item.content_key().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_non_image_file_rejected() {
        let mut store = SessionStore::default();
        let err = apply(
            &mut store,
            Command::Cell(CellCommand::Set {
                index: 0,
                content: ContentArgs {
                    text: None,
                    image: Some(PathBuf::from("notes.txt")),
                },
            }),
        );
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_extra_add_without_payload_appends_slot() {
        let mut store = SessionStore::default();
        apply(
            &mut store,
            Command::Extra(ExtraCommand::Add {
                content: ContentArgs::default(),
            }),
        )
        .unwrap();
        assert_eq!(store.extras().len(), 1);
        assert!(store.extras()[0].is_none());
    }

    #[test]
    fn test_cell_set_without_payload_rejected() {
        let mut store = SessionStore::default();
        store.set_cell_text(3, "A").unwrap();
        let err = apply(
            &mut store,
            Command::Cell(CellCommand::Set {
                index: 3,
                content: ContentArgs::default(),
            }),
        );
        assert!(
            matches!(err, Err(AppError::Validation(_))),
            "cell set with no payload must fail, got {err:?}"
        );
        assert_eq!(
            store.grid()[3].as_ref().map(|item| item.content_key().to_string()),
            Some("A".to_string()),
            "rejected set must leave the cell untouched"
        );
    }

    #[test]
    fn test_extra_set_without_payload_rejected() {
        let mut store = SessionStore::default();
        store.append_words(&["keep", "other"]);
        let err = apply(
            &mut store,
            Command::Extra(ExtraCommand::Set {
                index: 0,
                content: ContentArgs::default(),
            }),
        );
        assert!(
            matches!(err, Err(AppError::Validation(_))),
            "extra set with no payload must fail, got {err:?}"
        );
        let keys: Vec<_> = store
            .extras()
            .iter()
            .map(|s| s.as_ref().unwrap().content_key().to_string())
            .collect();
        assert_eq!(keys, vec!["keep", "other"], "extras must be unchanged");
    }

    #[test]
    fn test_import_file_appends_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "alpha\n\n  beta  \n\t\ngamma\n").unwrap();

        let mut store = SessionStore::default();
        let msg = apply(&mut store, Command::Import { file: path }).unwrap();
        assert!(msg.contains('3'));
        let keys: Vec<_> = store
            .extras()
            .iter()
            .map(|s| s.as_ref().unwrap().content_key().to_string())
            .collect();
        assert_eq!(keys, vec!["alpha", "beta", "gamma"]);
    }
}
