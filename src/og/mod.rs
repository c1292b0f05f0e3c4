use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

use spdlog::debug;

use crate::config::Config;
use crate::content::collection::load_collection;
use crate::content::{CollectionKind, FormattedEntry};
use crate::og::font::FontCache;

pub mod card;
pub mod font;

pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

#[derive(Debug)]
pub enum OgError {
    /// No entry of the collection has the requested slug
    NotFound,
    Load(String),
    Font(String),
    Render(String),
    Template(String),
}

impl Display for OgError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OgError::NotFound => write!(f, "Entry not found"),
            OgError::Load(msg) => write!(f, "Content load error: {}", msg),
            OgError::Font(msg) => write!(f, "Font error: {}", msg),
            OgError::Render(msg) => write!(f, "Render error: {}", msg),
            OgError::Template(msg) => write!(f, "Template error: {}", msg),
        }
    }
}

impl Error for OgError {}

/// Card for the entry with `slug`. The slug is resolved before the font is touched,
/// so an unknown slug is `NotFound` even without a usable font.
pub fn og_image_for(entries: &[FormattedEntry], slug: &str, wordmark: &str, fonts: &FontCache) -> Result<Vec<u8>, OgError> {
    let entry = entries.iter()
        .find(|e| e.slug == slug)
        .ok_or(OgError::NotFound)?;

    let font = fonts.get()?;
    debug!("Rendering OG card for {}", entry.permalink);
    card::render_card(entry.title(), wordmark, font)
}

/// Loads the collection and renders the card of one entry.
pub fn generate_og_image(config: &Config, kind: CollectionKind, slug: &str) -> Result<Vec<u8>, OgError> {
    let entries = load_collection(&config.paths.content_dir, kind)
        .map_err(|e| OgError::Load(e.to_string()))?;
    let fonts = FontCache::new(&config.paths.font_path);
    og_image_for(&entries, slug, &config.site.wordmark(), &fonts)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::parse_config;
    use crate::config::tests::SAMPLE_CFG;
    use crate::content::collection::tests::{sample_site, write_file};
    use crate::content::test_entries::{blog, date};
    use crate::og::font::tests::shipped_font_path;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_unknown_slug_is_not_found() {
        let entries = vec![blog("2024/hello", date(2024, 1, 2))];
        let err = og_image_for(&entries, "2024/missing", "oltdaniel.eu", &FontCache::new(Path::new("/nonexistent/og.ttf")))
            .err().unwrap();
        assert!(matches!(err, OgError::NotFound));
    }

    #[test]
    fn test_generate_for_known_slug() {
        let dir = sample_site();
        let mut config = parse_config(SAMPLE_CFG).unwrap();
        config.paths.content_dir = dir.path().to_path_buf();
        config.paths.font_path = shipped_font_path();

        let png = generate_og_image(&config, CollectionKind::Blog, "2024/my-post").unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert!(png.starts_with(PNG_MAGIC));

        let decoded = resvg::tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (OG_WIDTH, OG_HEIGHT));
    }

    #[test]
    fn test_generate_for_unknown_slug() {
        let dir = sample_site();
        let mut config = parse_config(SAMPLE_CFG).unwrap();
        config.paths.content_dir = dir.path().to_path_buf();
        let err = generate_og_image(&config, CollectionKind::Notes, "nope").err().unwrap();
        assert!(matches!(err, OgError::NotFound));
    }

    #[test]
    fn test_generate_with_broken_collection() {
        let dir = sample_site();
        write_file(dir.path(), "blog/2024-02-02-broken.md", "---\ntitle: x\n---\n");
        let mut config = parse_config(SAMPLE_CFG).unwrap();
        config.paths.content_dir = dir.path().to_path_buf();
        let err = generate_og_image(&config, CollectionKind::Blog, "2024/my-post").err().unwrap();
        assert!(matches!(err, OgError::Load(_)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(OgError::NotFound.to_string(), "Entry not found");
        assert_eq!(OgError::Font("gone".to_string()).to_string(), "Font error: gone");
    }
}
