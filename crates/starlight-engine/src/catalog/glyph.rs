use std::collections::HashMap;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single star of a glyph, in normalized unit-square coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
}

impl Star {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Definition of a single letter's constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterGlyph {
    /// Stars in tap order. The flat index is the only thing taps are matched against.
    pub stars: Vec<Star>,
    /// Drawable strokes, each a list of star indices.
    /// Absent means the glyph is drawn as one polyline through `stars`.
    #[serde(default)]
    pub segments: Vec<Vec<usize>>,
}

impl LetterGlyph {
    pub fn new(stars: Vec<Star>) -> Self {
        Self { stars, segments: Vec::new() }
    }

    pub fn with_segments(mut self, segments: Vec<Vec<usize>>) -> Self {
        self.segments = segments;
        self
    }

    /// Number of stars the user has to tap.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn star(&self, index: usize) -> Option<&Star> {
        self.stars.get(index)
    }

    /// Line pieces `(from, to)` making up the finished glyph.
    /// Falls back to consecutive stars when no segments are defined.
    pub fn strokes(&self) -> Vec<(usize, usize)> {
        if self.segments.is_empty() {
            return (1..self.stars.len()).map(|i| (i - 1, i)).collect();
        }
        self.segments
            .iter()
            .flat_map(|seg| seg.windows(2).map(|w| (w[0], w[1])))
            .collect()
    }

    /// Index of the first segment entry pointing outside `stars`, if any.
    pub(crate) fn dangling_segment_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .flatten()
            .copied()
            .find(|&i| i >= self.stars.len())
    }
}

/// Letter -> glyph lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathCatalog {
    glyphs: HashMap<char, LetterGlyph>,
}

impl PathCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, letter: char, glyph: LetterGlyph) {
        self.glyphs.insert(letter, glyph);
    }

    /// Glyph for a letter. `None` when the catalog has no such letter.
    pub fn glyph_for(&self, letter: char) -> Option<&LetterGlyph> {
        self.glyphs.get(&letter)
    }

    pub fn has_letter(&self, letter: char) -> bool {
        self.glyphs.contains_key(&letter)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_JSON: &str = r#"{
        "A": {
            "stars": [
                {"x": 0.5, "y": 0.1}, {"x": 0.1, "y": 0.9}, {"x": 0.9, "y": 0.9},
                {"x": 0.3, "y": 0.6}, {"x": 0.7, "y": 0.6}
            ],
            "segments": [[0, 1], [0, 2], [3, 4]]
        },
        "N": {
            "stars": [
                {"x": 0.1, "y": 0.9}, {"x": 0.1, "y": 0.1},
                {"x": 0.9, "y": 0.9}, {"x": 0.9, "y": 0.1}
            ]
        }
    }"#;

    #[test]
    fn parse_glyphs() {
        let catalog = serde_json::from_str::<PathCatalog>(TEST_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.glyph_for('A').unwrap().len(), 5);
        assert!(catalog.glyph_for('N').unwrap().segments.is_empty());
    }

    #[test]
    fn unknown_letter_is_none() {
        let catalog = serde_json::from_str::<PathCatalog>(TEST_JSON).unwrap();
        assert!(catalog.glyph_for('Z').is_none());
        assert!(!catalog.has_letter('Z'));
    }

    #[test]
    fn strokes_follow_segments() {
        let catalog = serde_json::from_str::<PathCatalog>(TEST_JSON).unwrap();
        let a = catalog.glyph_for('A').unwrap();
        assert_eq!(a.strokes(), vec![(0, 1), (0, 2), (3, 4)]);
    }

    #[test]
    fn strokes_default_to_polyline() {
        let catalog = serde_json::from_str::<PathCatalog>(TEST_JSON).unwrap();
        let n = catalog.glyph_for('N').unwrap();
        assert_eq!(n.strokes(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn dangling_segment_detected() {
        let glyph = LetterGlyph::new(vec![Star::new(0.0, 0.0), Star::new(1.0, 1.0)])
            .with_segments(vec![vec![0, 1, 2]]);
        assert_eq!(glyph.dangling_segment_index(), Some(2));
    }
}
