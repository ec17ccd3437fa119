use std::fmt::Write as _;
use std::path::Path;

use crate::errors::AppError;
use crate::models::content::ContentItem;
use crate::session::{load_session, save_session, SessionStore};

/// `init`: writes a default session. Refuses to clobber an existing slot
/// unless `force` is set.
pub fn init(path: &Path, force: bool) -> Result<String, AppError> {
    if path.exists() && !force {
        return Err(AppError::Validation(format!(
            "A session already exists at {} (use --force to replace it)",
            path.display()
        )));
    }
    save_session(path, &SessionStore::default().snapshot())?;
    Ok(format!("Started a new session at {}", path.display()))
}

/// `load`: validates `source` fully before the working slot is touched.
pub fn load_into(working: &Path, source: &Path) -> Result<String, AppError> {
    let snapshot = load_session(source)?;
    let mut store = SessionStore::default();
    store.restore(snapshot)?;
    save_session(working, &store.snapshot())?;
    Ok(format!("Loaded session from {}", source.display()))
}

fn slot_label(slot: &Option<ContentItem>) -> String {
    slot.as_ref()
        .map(ContentItem::label)
        .unwrap_or_else(|| "(empty)".to_string())
}

/// Human-readable dump of the whole session.
pub fn describe(store: &SessionStore) -> String {
    let settings = store.settings();
    let grid = store.grid();
    let extras = store.extras();
    let center = settings.grid_size.center_index();

    let mut out = String::new();
    let _ = writeln!(out, "Title:      {}", settings.title);
    let _ = writeln!(out, "Grid:       {}", settings.grid_size);
    let _ = writeln!(out, "Cards:      {}", settings.num_cards);
    let _ = writeln!(
        out,
        "Colors:     background {}, text {}, lines {}",
        settings.bg_color, settings.text_color, settings.line_color
    );
    let _ = writeln!(out, "Lines:      {:?}", settings.line_thickness);
    if settings.grid_size.is_odd() {
        let _ = writeln!(
            out,
            "Pin center: {}",
            if settings.is_center_cell_free { "yes" } else { "no" }
        );
    }

    let filled = grid.iter().filter(|s| s.is_some()).count();
    let _ = writeln!(out, "\nTemplate grid ({filled}/{} filled):", grid.len());
    for (i, slot) in grid.iter().enumerate() {
        let marker = if settings.pin_active() && Some(i) == center {
            " [pinned]"
        } else {
            ""
        };
        let _ = writeln!(out, "  {i:>2}: {}{marker}", slot_label(slot));
    }

    let _ = writeln!(out, "\nExtra items ({}):", extras.len());
    for (i, slot) in extras.iter().enumerate() {
        let _ = writeln!(out, "  {i:>2}: {}", slot_label(slot));
    }
    out
}
