use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Side length of the square grid. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridSize {
    Three,
    Four,
    Five,
}

impl GridSize {
    pub fn side(self) -> usize {
        match self {
            GridSize::Three => 3,
            GridSize::Four => 4,
            GridSize::Five => 5,
        }
    }

    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }

    pub fn is_odd(self) -> bool {
        self.side() % 2 != 0
    }

    /// The exact center slot. Even grids have none.
    pub fn center_index(self) -> Option<usize> {
        self.is_odd().then(|| self.cell_count() / 2)
    }
}

impl TryFrom<u8> for GridSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(GridSize::Three),
            4 => Ok(GridSize::Four),
            5 => Ok(GridSize::Five),
            other => Err(format!("grid size must be 3, 4 or 5 (got {other})")),
        }
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> u8 {
        size.side() as u8
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineThickness {
    Thin,
    Medium,
    Thick,
}

impl LineThickness {
    pub fn stroke_px(self) -> u32 {
        match self {
            LineThickness::Thin => 1,
            LineThickness::Medium => 2,
            LineThickness::Thick => 4,
        }
    }
}

impl FromStr for LineThickness {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thin" => Ok(LineThickness::Thin),
            "medium" => Ok(LineThickness::Medium),
            "thick" => Ok(LineThickness::Thick),
            other => Err(AppError::Validation(format!(
                "line thickness must be thin, medium or thick (got '{other}')"
            ))),
        }
    }
}

/// Generation parameters plus style. Field names follow the saved-session format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoSettings {
    pub title: String,
    pub grid_size: GridSize,
    pub num_cards: u32,
    pub bg_color: String,
    pub text_color: String,
    pub line_color: String,
    pub line_thickness: LineThickness,
    /// Only meaningful on odd grids.
    pub is_center_cell_free: bool,
}

impl Default for BingoSettings {
    fn default() -> Self {
        Self {
            title: "Custom Bingo".to_string(),
            grid_size: GridSize::Five,
            num_cards: 1,
            bg_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            line_color: "#000000".to_string(),
            line_thickness: LineThickness::Medium,
            is_center_cell_free: true,
        }
    }
}

impl BingoSettings {
    /// Pinning only takes effect when the grid has an exact center.
    pub fn pin_active(&self) -> bool {
        self.grid_size.is_odd() && self.is_center_cell_free
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.num_cards == 0 {
            return Err(AppError::Validation(
                "number of cards must be at least 1".to_string(),
            ));
        }
        for (name, color) in [
            ("background color", &self.bg_color),
            ("text color", &self.text_color),
            ("line color", &self.line_color),
        ] {
            if !is_hex_color(color) {
                return Err(AppError::Validation(format!(
                    "{name} must be a hex color like #1A2B3C (got '{color}')"
                )));
            }
        }
        Ok(())
    }
}

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
