use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::settings::LineThickness;

/// Bingo card editor and generator.
///
/// Every command loads the session slot, applies one action and writes the
/// slot back.
#[derive(Parser, Debug)]
#[command(name = "bingo")]
#[command(about = "Design bingo card templates and generate printable, unique cards")]
pub struct Cli {
    /// Session slot to operate on (default: $BINGO_SAVE_PATH or ./bingoGeneratorState.json)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Seed for reproducible card generation (default: $BINGO_SEED, else random)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a fresh session with default settings
    Init {
        /// Overwrite an existing session slot
        #[arg(long)]
        force: bool,
    },
    /// Print settings, template grid and extra items
    Show,
    /// Change settings. Changing the grid size clears the template grid.
    Settings(SettingsArgs),
    /// Edit a template grid cell
    #[command(subcommand)]
    Cell(CellCommand),
    /// Remove all content from the template grid
    ClearGrid,
    /// Edit the extra items list
    #[command(subcommand)]
    Extra(ExtraCommand),
    /// Append a word list (one entry per line) to the extra items; `-` reads stdin
    Import { file: PathBuf },
    /// Generate cards from the template grid and extra items
    Generate(GenerateArgs),
    /// Copy the current session to another slot
    SaveAs { path: PathBuf },
    /// Replace the current session with the one stored at `path`
    Load { path: PathBuf },
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// Grid side length: 3, 4 or 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(3..=5))]
    pub size: Option<u8>,
    /// Number of cards to generate
    #[arg(long)]
    pub cards: Option<u32>,
    /// Background color (#RRGGBB)
    #[arg(long)]
    pub bg: Option<String>,
    /// Text color (#RRGGBB)
    #[arg(long)]
    pub text_color: Option<String>,
    /// Grid line color (#RRGGBB)
    #[arg(long)]
    pub line_color: Option<String>,
    /// thin, medium or thick
    #[arg(long)]
    pub thickness: Option<LineThickness>,
    /// Pin the center cell's content on every card (odd grids only)
    #[arg(long)]
    pub pin: Option<bool>,
}

/// Text or image payload for a cell or extra item.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct ContentArgs {
    #[arg(long)]
    pub text: Option<String>,
    /// Image file (png, jpg, gif, webp, svg)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CellCommand {
    /// Set a cell (0-based index, row-major); needs --text or --image
    Set {
        index: usize,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Empty a cell
    Clear { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum ExtraCommand {
    /// Append an item; with no payload appends an empty slot
    Add {
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Replace an item's content (--text or --image); empty text removes it
    Set {
        index: usize,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Remove one item
    Remove { index: usize },
    /// Remove every extra item
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Write a print-formatted HTML document (one card per page)
    #[arg(long)]
    pub print: Option<PathBuf>,
    /// Write a zip archive with one SVG image per card
    #[arg(long)]
    pub export: Option<PathBuf>,
    /// Filename prefix for archive entries (default: $BINGO_ARCHIVE_PREFIX or bingo_card_)
    #[arg(long)]
    pub prefix: Option<String>,
    /// Print the card layouts as JSON to stdout
    #[arg(long)]
    pub json: bool,
}
