// Render/export: turns generated cards into visual artifacts.
// Card rendering is async and sequential; archive building runs on the blocking pool.

pub mod archive;
pub mod export;
pub mod print;
pub mod svg;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::card::GeneratedCard;
use crate::models::settings::BingoSettings;

/// Produces one visual artifact per card. Implementations may share a single
/// drawing surface, so callers render one card at a time.
#[async_trait]
pub trait CardRenderer: Send + Sync {
    /// Extension used for archive entry names, without the dot.
    fn file_extension(&self) -> &'static str;

    async fn render(
        &self,
        card: &GeneratedCard,
        settings: &BingoSettings,
    ) -> Result<Bytes, AppError>;
}

/// Escapes text for use in XML/HTML content and attribute values.
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }
}
