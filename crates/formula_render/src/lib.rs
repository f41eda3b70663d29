//! Formula Render - turning laid-out formulas into drawable primitives
//!
//! The paint pass walks the element tree produced by `formula_model`,
//! accumulating child offsets into absolute coordinates, and emits a flat
//! list of primitives (glyphs at baselines, placeholder boxes, caret,
//! selection band) that any drawing backend can consume.

pub mod draw;
pub mod error;
pub mod primitives;

pub use draw::{RenderConfig, Renderer};
pub use error::{RenderError, RenderResult};
pub use primitives::{Color, RenderOutput, RenderPrimitive};

#[cfg(test)]
mod tests {
    use super::*;
    use formula_editor::FormulaSession;
    use formula_model::Point;

    #[test]
    fn test_session_to_pixels_pipeline() {
        // Type, lay out, paint: the full host flow
        let mut session = FormulaSession::new();
        session.type_str("y=x^2").unwrap();
        session.ensure_layout();

        let renderer = Renderer::new();
        let output = renderer
            .render(session.tree(), session.style(), Point::origin())
            .unwrap();
        assert!(output.bounds.width() > 0.0);
        assert!(output.bounds.height() > 0.0);

        let glyphs = output
            .primitives
            .iter()
            .filter(|p| matches!(p, RenderPrimitive::Glyph { .. }))
            .count();
        assert_eq!(glyphs, 4); // y, =, x, 2

        let cursor_primitives = renderer.render_cursor(session.tree(), session.cursor());
        assert_eq!(cursor_primitives.len(), 1);
    }

    #[test]
    fn test_superscript_glyph_sits_higher_than_base() {
        let mut session = FormulaSession::new();
        session.type_str("x^2").unwrap();
        session.ensure_layout();

        let output = Renderer::new()
            .render(session.tree(), session.style(), Point::origin())
            .unwrap();
        let mut baselines = std::collections::HashMap::new();
        for p in &output.primitives {
            if let RenderPrimitive::Glyph { text, baseline, .. } = p {
                baselines.insert(text.clone(), baseline.y);
            }
        }
        assert!(baselines["2"] < baselines["x"], "script is raised");
    }
}
