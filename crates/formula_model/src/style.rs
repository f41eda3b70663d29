//! Style context - the font and derived metrics shared by layout and paint
//!
//! The same context must be used for the layout pass and the paint pass,
//! otherwise glyph baselines drift from the computed boxes.

use serde::{Deserialize, Serialize};

/// Font metrics derived from a base font size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Base font size in points
    pub font_size: f32,
    /// Ascent above the baseline
    pub ascent: f32,
    /// Descent below the baseline
    pub descent: f32,
    /// Advance width of a typical character
    pub char_width: f32,
}

impl FontMetrics {
    /// Create metrics for a given font size.
    /// Approximate values based on typical text fonts.
    pub fn for_size(font_size: f32) -> Self {
        let em = font_size;
        Self {
            font_size,
            ascent: em * 0.8,
            descent: em * 0.2,
            char_width: em * 0.5,
        }
    }

    /// Full line height (ascent plus descent)
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_size(18.0)
    }
}

/// All variable information needed to lay out and draw a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleContext {
    /// Font family name, for the rendering backend
    pub font_family: String,
    /// Metrics of the active font
    pub metrics: FontMetrics,
}

impl StyleContext {
    /// Create a context with the default 18pt font
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a specific font size
    pub fn for_size(font_size: f32) -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            metrics: FontMetrics::for_size(font_size),
        }
    }

    /// Advance width of a glyph (one grapheme cluster)
    pub fn advance(&self, glyph: &str) -> f32 {
        self.metrics.char_width * glyph.chars().count().max(1) as f32
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::for_size(18.0)
    }
}
