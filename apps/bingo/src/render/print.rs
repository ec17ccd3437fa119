//! Print layout — a standalone HTML document with one card per printed page.

use std::fmt::Write as _;

use crate::models::card::GeneratedCard;
use crate::models::content::CellValue;
use crate::models::settings::BingoSettings;
use crate::render::escape_markup;

/// Renders every card into one printable HTML page sequence.
pub fn render_print_layout(cards: &[GeneratedCard], settings: &BingoSettings) -> String {
    let stroke = settings.line_thickness.stroke_px();
    let side = settings.grid_size.side();
    let title = escape_markup(&settings.title);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ margin: 0; font-family: sans-serif; }}
  .page {{ padding: 16px; display: flex; flex-direction: column; align-items: center; page-break-after: always; break-after: page; }}
  .page:last-child {{ page-break-after: auto; break-after: auto; }}
  h1 {{ font-size: 30px; text-align: center; margin: 0 0 16px 0; color: {text}; }}
  .grid {{ display: grid; grid-template-columns: repeat({side}, 1fr); width: 100%; max-width: 672px; aspect-ratio: 1 / 1; }}
  .cell {{ display: flex; align-items: center; justify-content: center; text-align: center; aspect-ratio: 1 / 1; padding: 4px; overflow: hidden; overflow-wrap: anywhere;
          background-color: {bg}; color: {text}; border: {stroke}px solid {line}; }}
  .cell img {{ object-fit: contain; width: 100%; height: 100%; }}
</style>
</head>
<body>
"#,
        text = settings.text_color,
        bg = settings.bg_color,
        line = settings.line_color,
    );

    for (card_idx, card) in cards.iter().enumerate() {
        let _ = writeln!(html, r#"<section class="page">"#);
        let _ = writeln!(html, "<h1>{title}</h1>");
        let _ = writeln!(html, r#"<div class="grid">"#);
        for (cell_idx, cell) in card.cells().iter().enumerate() {
            match cell.as_ref().map(|item| &item.value) {
                Some(CellValue::Image { content }) => {
                    let _ = writeln!(
                        html,
                        r#"<div class="cell"><img src="{}" alt="Card {} cell {}"></div>"#,
                        escape_markup(content),
                        card_idx + 1,
                        cell_idx + 1
                    );
                }
                Some(CellValue::Text { content }) => {
                    let _ = writeln!(
                        html,
                        r#"<div class="cell"><span>{}</span></div>"#,
                        escape_markup(content)
                    );
                }
                None => {
                    let _ = writeln!(html, r#"<div class="cell"></div>"#);
                }
            }
        }
        let _ = writeln!(html, "</div>\n</section>");
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::allocator::allocate;
    use crate::generation::pool::ContentPool;
    use crate::models::content::ContentItem;
    use crate::models::settings::{GridSize, LineThickness};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cards(count: usize) -> Vec<GeneratedCard> {
        let pool = ContentPool {
            items: (0..16).filter_map(|i| ContentItem::text(format!("w{i}"))).collect(),
            pinned: None,
        };
        allocate(&pool, GridSize::Four, count, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_one_page_per_card() {
        let settings = BingoSettings {
            grid_size: GridSize::Four,
            ..BingoSettings::default()
        };
        let html = render_print_layout(&cards(3), &settings);
        assert_eq!(html.matches(r#"<section class="page">"#).count(), 3);
        assert_eq!(html.matches(r#"<div class="cell">"#).count(), 48);
        assert!(html.contains("repeat(4, 1fr)"));
    }

    #[test]
    fn test_styles_follow_settings() {
        let settings = BingoSettings {
            grid_size: GridSize::Four,
            line_thickness: LineThickness::Thick,
            line_color: "#FF0000".to_string(),
            ..BingoSettings::default()
        };
        let html = render_print_layout(&cards(1), &settings);
        assert!(html.contains("border: 4px solid #FF0000"));
    }

    #[test]
    fn test_no_cards_renders_empty_body() {
        let html = render_print_layout(&[], &BingoSettings::default());
        assert!(!html.contains("<section"));
    }
}
