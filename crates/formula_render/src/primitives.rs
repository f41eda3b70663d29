//! Render primitives - what a drawing backend consumes
//!
//! The paint pass flattens the laid-out element tree into a list of
//! positioned primitives in absolute coordinates; a backend only needs to
//! know how to draw text at a baseline, rectangles, and lines.

use formula_model::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const LIGHT_BLUE: Color = Color::new(100, 150, 255, 120);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// One drawable item, in absolute coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderPrimitive {
    /// A glyph drawn at a baseline position
    Glyph {
        text: String,
        baseline: Point,
        color: Color,
    },
    /// An outline box (the placeholder for an empty sequence)
    OutlineBox { rect: Rect, color: Color },
    /// The text caret, a vertical line
    Caret { x: f32, y: f32, height: f32, color: Color },
    /// The selection band behind a selected child range
    Selection { rect: Rect, color: Color },
}

/// The result of one paint pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Primitives in paint order
    pub primitives: Vec<RenderPrimitive>,
    /// Bounding box of the whole formula
    pub bounds: Rect,
}
