//! SVG card renderer — one standalone 800px-wide image per card.
//!
//! Layout: padding, title in the text color, then a square grid. Text cells are
//! word-wrapped by an average glyph width estimate; image cells embed the
//! data-URI directly.

use std::fmt::Write as _;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::card::GeneratedCard;
use crate::models::content::{CellValue, ContentItem};
use crate::models::settings::{BingoSettings, GridSize};
use crate::render::{escape_markup, CardRenderer};

const CARD_WIDTH: f32 = 800.0;
const PADDING: f32 = 24.0;
const TITLE_FONT_PX: f32 = 48.0;
const TITLE_BAND: f32 = 96.0;
const CELL_INSET: f32 = 6.0;
/// Average glyph width as a fraction of font size.
const GLYPH_WIDTH_RATIO: f32 = 0.55;
const LINE_HEIGHT_RATIO: f32 = 1.2;

#[derive(Debug, Default, Clone, Copy)]
pub struct SvgCardRenderer;

#[async_trait]
impl CardRenderer for SvgCardRenderer {
    fn file_extension(&self) -> &'static str {
        "svg"
    }

    async fn render(
        &self,
        card: &GeneratedCard,
        settings: &BingoSettings,
    ) -> Result<Bytes, AppError> {
        if card.size() != settings.grid_size {
            return Err(AppError::Render(format!(
                "card is {} but settings are {}",
                card.size(),
                settings.grid_size
            )));
        }
        Ok(Bytes::from(render_card_svg(card, settings)))
    }
}

fn cell_font_px(size: GridSize) -> f32 {
    match size {
        GridSize::Three => 30.0,
        GridSize::Four => 24.0,
        GridSize::Five => 20.0,
    }
}

/// Renders a card to an SVG document string.
pub fn render_card_svg(card: &GeneratedCard, settings: &BingoSettings) -> String {
    let side = card.size().side();
    let grid_px = CARD_WIDTH - 2.0 * PADDING;
    let cell_px = grid_px / side as f32;
    let height = PADDING + TITLE_BAND + grid_px + PADDING;
    let stroke = settings.line_thickness.stroke_px();
    let font_px = cell_font_px(card.size());

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{height}" viewBox="0 0 {CARD_WIDTH} {height}">"#
    );
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        settings.bg_color
    );
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{TITLE_FONT_PX}" font-weight="bold" text-anchor="middle" fill="{}">{}</text>"#,
        CARD_WIDTH / 2.0,
        PADDING + TITLE_BAND * 0.66,
        settings.text_color,
        escape_markup(&settings.title)
    );

    let grid_top = PADDING + TITLE_BAND;
    for (idx, cell) in card.cells().iter().enumerate() {
        let x = PADDING + (idx % side) as f32 * cell_px;
        let y = grid_top + (idx / side) as f32 * cell_px;
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{cell_px}" height="{cell_px}" fill="{}" stroke="{}" stroke-width="{stroke}"/>"#,
            settings.bg_color, settings.line_color
        );
        if let Some(item) = cell {
            write_cell_content(&mut svg, item, x, y, cell_px, font_px, &settings.text_color);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn write_cell_content(
    svg: &mut String,
    item: &ContentItem,
    x: f32,
    y: f32,
    cell_px: f32,
    font_px: f32,
    color: &str,
) {
    let inner = cell_px - 2.0 * CELL_INSET;
    match &item.value {
        CellValue::Image { content } => {
            let _ = write!(
                svg,
                r#"<image x="{}" y="{}" width="{inner}" height="{inner}" preserveAspectRatio="xMidYMid meet" href="{}"/>"#,
                x + CELL_INSET,
                y + CELL_INSET,
                escape_markup(content)
            );
        }
        CellValue::Text { content } => {
            let max_chars = ((inner / (font_px * GLYPH_WIDTH_RATIO)).floor() as usize).max(1);
            let max_lines = ((inner / (font_px * LINE_HEIGHT_RATIO)).floor() as usize).max(1);
            let lines = wrap_text(content, max_chars, max_lines);

            let line_px = font_px * LINE_HEIGHT_RATIO;
            let block = line_px * lines.len() as f32;
            let center_x = x + cell_px / 2.0;
            // First baseline so the block is vertically centered.
            let first = y + (cell_px - block) / 2.0 + font_px;

            let _ = write!(
                svg,
                r#"<text font-family="sans-serif" font-size="{font_px}" text-anchor="middle" fill="{color}">"#
            );
            for (i, line) in lines.iter().enumerate() {
                let _ = write!(
                    svg,
                    r#"<tspan x="{center_x}" y="{}">{}</tspan>"#,
                    first + i as f32 * line_px,
                    escape_markup(line)
                );
            }
            svg.push_str("</text>");
        }
    }
}

/// Greedy word wrap. Words longer than a line are split; overflow past
/// `max_lines` is cut and marked with an ellipsis.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..max_chars).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            *last = chars.into_iter().collect::<String>() + "…";
        }
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
