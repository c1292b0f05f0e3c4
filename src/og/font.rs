use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use resvg::usvg::fontdb;
use spdlog::info;

use crate::og::OgError;

/// Font used for every card, shared read-only between renders.
pub struct OgFont {
    pub database: Arc<fontdb::Database>,
    pub family: String,
}

/// The font at one path, read on first use and kept while the cache lives.
/// A failed read is not remembered, the next call tries again.
pub struct FontCache {
    path: PathBuf,
    font: OnceCell<OgFont>,
}

impl FontCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FontCache {
            path: path.into(),
            font: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<&OgFont, OgError> {
        self.font.get_or_try_init(|| {
            let font = load_font(&self.path)?;
            info!("Loaded OG font {} from {}", font.family, self.path.display());
            Ok(font)
        })
    }
}

pub fn load_font(font_path: &Path) -> Result<OgFont, OgError> {
    let data = fs::read(font_path)
        .map_err(|e| OgError::Font(format!("Error reading font {}: {}", font_path.display(), e)))?;
    font_from_bytes(data)
}

pub fn font_from_bytes(data: Vec<u8>) -> Result<OgFont, OgError> {
    let mut database = fontdb::Database::new();
    database.load_font_data(data);

    let family = database.faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
        .ok_or_else(|| OgError::Font("Font data contains no usable face".to_string()))?;

    Ok(OgFont {
        database: Arc::new(database),
        family,
    })
}
