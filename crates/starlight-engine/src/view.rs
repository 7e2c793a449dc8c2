//! Read-only view models for the renderer.
//!
//! Positions are in normalized coordinates: a single letter fills the unit
//! square while it is being traced; the finished name is laid out in one
//! horizontal slot per letter. The renderer scales them to its viewport.

use glam::Vec2;
use serde::Serialize;

use crate::catalog::{Catalog, Star};
use crate::progression::{GameState, Phase};

/// Share of a letter's slot the glyph actually occupies; the rest is spacing.
pub const GLYPH_FILL: f32 = 0.8;

/// Position of `star` when letter `letter_index` of `total` sits in its own slot.
pub fn slot_position(star: &Star, letter_index: usize, total: usize) -> Vec2 {
    let slot = 1.0 / total.max(1) as f32;
    Vec2::new(letter_index as f32 * slot + star.x * slot * GLYPH_FILL, star.y)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarView {
    pub x: f32,
    pub y: f32,
    pub letter_index: usize,
    pub star_index: usize,
    pub completed: bool,
    /// The glowing star to tap next.
    pub next: bool,
    /// Carries the wrong-tap marker.
    pub wrong: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub letter_index: usize,
}

impl LineView {
    fn new(a: Vec2, b: Vec2, letter_index: usize) -> Self {
        Self { x1: a.x, y1: a.y, x2: b.x, y2: b.y, letter_index }
    }
}

/// Everything the constellation layer draws for one state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstellationView {
    pub stars: Vec<StarView>,
    pub lines: Vec<LineView>,
}

impl ConstellationView {
    pub fn build(catalog: &Catalog, state: &GameState) -> Self {
        match state.phase {
            Phase::Intro => Self::default(),
            Phase::Playing => Self::active_letter(catalog, state),
            Phase::Finale | Phase::FreeRoam => Self::whole_name(catalog),
        }
    }

    fn active_letter(catalog: &Catalog, state: &GameState) -> Self {
        let letter_index = state.letter_index;
        let Some(glyph) = catalog.glyph_at(letter_index) else {
            return Self::default();
        };
        let stars = glyph
            .stars
            .iter()
            .enumerate()
            .map(|(i, star)| StarView {
                x: star.x,
                y: star.y,
                letter_index,
                star_index: i,
                completed: i < state.star_index,
                next: i == state.star_index,
                wrong: state.wrong_tap.is_some_and(|w| w.star_index == i),
            })
            .collect();
        // Connect the stars tapped so far, in tap order.
        let lines = (1..state.star_index.min(glyph.len()))
            .map(|i| LineView::new(glyph.stars[i - 1].pos(), glyph.stars[i].pos(), letter_index))
            .collect();
        Self { stars, lines }
    }

    fn whole_name(catalog: &Catalog) -> Self {
        let total = catalog.len();
        let mut view = Self::default();
        for letter_index in 0..total {
            let Some(glyph) = catalog.glyph_at(letter_index) else { continue };
            for (i, star) in glyph.stars.iter().enumerate() {
                let pos = slot_position(star, letter_index, total);
                view.stars.push(StarView {
                    x: pos.x,
                    y: pos.y,
                    letter_index,
                    star_index: i,
                    completed: true,
                    next: false,
                    wrong: false,
                });
            }
            for (a, b) in glyph.strokes() {
                view.lines.push(LineView::new(
                    slot_position(&glyph.stars[a], letter_index, total),
                    slot_position(&glyph.stars[b], letter_index, total),
                    letter_index,
                ));
            }
        }
        view
    }
}

/// One letter in the progress ribbon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RibbonEntry {
    pub letter: char,
    pub completed: bool,
    pub active: bool,
}

/// Progress ribbon across the top of the screen. Empty during the intro.
pub fn ribbon(catalog: &Catalog, state: &GameState) -> Vec<RibbonEntry> {
    if state.phase == Phase::Intro {
        return Vec::new();
    }
    catalog
        .name()
        .letters
        .iter()
        .enumerate()
        .map(|(i, &letter)| RibbonEntry {
            letter,
            completed: state.completed_letters.get(i).copied().unwrap_or(false),
            active: state.phase == Phase::Playing && i == state.letter_index,
        })
        .collect()
}
