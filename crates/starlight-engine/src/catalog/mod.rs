//! Static game data: letter constellations and the name they spell.
//!
//! A [`Catalog`] is validated once when it is built, so everything downstream
//! can rely on every letter occurrence having a non-empty glyph and an unlock
//! message.

pub mod glyph;
pub mod name;

use serde::Deserialize;
use thiserror::Error;

pub use glyph::{LetterGlyph, PathCatalog, Star};
pub use name::NameSpec;

/// Startup invariant violations in the game data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("the name has no letters")]
    EmptyName,
    #[error("letter '{letter}' (occurrence {occurrence}) has no glyph")]
    MissingGlyph { letter: char, occurrence: usize },
    #[error("glyph for '{letter}' has no stars")]
    EmptyGlyph { letter: char },
    #[error("glyph for '{letter}' has a segment pointing at star {index}, past its {len} stars")]
    DanglingSegment { letter: char, index: usize, len: usize },
    #[error("no message for key '{key}' (occurrence {occurrence})")]
    MissingMessage { key: String, occurrence: usize },
}

#[derive(Deserialize)]
struct CatalogFile {
    name: NameSpec,
    glyphs: PathCatalog,
}

/// Validated glyph catalog plus name spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    paths: PathCatalog,
    name: NameSpec,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(paths: PathCatalog, name: NameSpec) -> Result<Self, CatalogError> {
        let catalog = Self { paths, name };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse `{ "name": {...}, "glyphs": {...} }` and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.glyphs, file.name)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        for (occurrence, &letter) in self.name.letters.iter().enumerate() {
            let glyph = self
                .paths
                .glyph_for(letter)
                .ok_or(CatalogError::MissingGlyph { letter, occurrence })?;
            if glyph.is_empty() {
                return Err(CatalogError::EmptyGlyph { letter });
            }
            if let Some(index) = glyph.dangling_segment_index() {
                return Err(CatalogError::DanglingSegment { letter, index, len: glyph.len() });
            }
            // message_key is always Some for an in-range occurrence
            let key = self.name.message_key(occurrence).unwrap_or_default();
            if !self.name.messages.contains_key(&key) {
                return Err(CatalogError::MissingMessage { key, occurrence });
            }
        }
        Ok(())
    }

    pub fn paths(&self) -> &PathCatalog {
        &self.paths
    }

    pub fn name(&self) -> &NameSpec {
        &self.name
    }

    /// Number of letter occurrences in the name.
    pub fn len(&self) -> usize {
        self.name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn glyph_for(&self, letter: char) -> Option<&LetterGlyph> {
        self.paths.glyph_for(letter)
    }

    pub fn letter_at(&self, occurrence: usize) -> Option<char> {
        self.name.letter_at(occurrence)
    }

    /// Glyph of the letter occurrence at `occurrence`.
    pub fn glyph_at(&self, occurrence: usize) -> Option<&LetterGlyph> {
        self.letter_at(occurrence).and_then(|c| self.paths.glyph_for(c))
    }

    /// Number of stars in the letter occurrence at `occurrence` (0 if out of range).
    pub fn stars_in(&self, occurrence: usize) -> usize {
        self.glyph_at(occurrence).map_or(0, LetterGlyph::len)
    }

    pub fn message_key(&self, occurrence: usize) -> Option<String> {
        self.name.message_key(occurrence)
    }

    pub fn message_for(&self, occurrence: usize) -> Option<&str> {
        self.name.message_for(occurrence)
    }

    pub fn finale_note(&self) -> Option<&str> {
        self.name.finale_note()
    }
}
