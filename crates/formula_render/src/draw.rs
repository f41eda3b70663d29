//! The paint pass: walk the laid-out tree and emit primitives
//!
//! Positions accumulate top-down: each child's offset is added to the
//! running origin, so the primitives come out in absolute coordinates.
//! The same [`StyleContext`] used for layout must be used here, or glyph
//! baselines will not sit on the computed boxes.

use crate::error::RenderResult;
use crate::primitives::{Color, RenderOutput, RenderPrimitive};
use formula_editor::Cursor;
use formula_model::{ElementId, ElementKind, FormulaTree, IndexCorner, Point, Rect, StyleContext};

/// Colors used by the paint pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Glyph color
    pub color: Color,
    /// Outline color of empty sequence boxes
    pub box_color: Color,
    /// Caret color
    pub caret_color: Color,
    /// Selection band color
    pub selection_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            box_color: Color::BLUE,
            caret_color: Color::BLUE,
            selection_color: Color::LIGHT_BLUE,
        }
    }
}

/// Flattens formula trees into render primitives
#[derive(Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Paint the whole formula, rooted at `origin`
    pub fn render(
        &self,
        tree: &FormulaTree,
        ctx: &StyleContext,
        origin: Point,
    ) -> RenderResult<RenderOutput> {
        let root = tree.root();
        let mut primitives = Vec::new();
        self.draw_element(tree, root, ctx, origin, &mut primitives)?;
        let size = tree.get(root)?.size;
        Ok(RenderOutput {
            primitives,
            bounds: Rect::from_origin_size(origin, size),
        })
    }

    fn draw_element(
        &self,
        tree: &FormulaTree,
        id: ElementId,
        ctx: &StyleContext,
        origin: Point,
        primitives: &mut Vec<RenderPrimitive>,
    ) -> RenderResult<()> {
        let element = tree.get(id)?;
        match &element.kind {
            ElementKind::Glyph { text } => {
                primitives.push(RenderPrimitive::Glyph {
                    text: text.clone(),
                    baseline: Point::new(origin.x, origin.y + ctx.metrics.ascent),
                    color: self.config.color,
                });
            }
            ElementKind::Sequence { children } => {
                if children.is_empty() {
                    primitives.push(RenderPrimitive::OutlineBox {
                        rect: Rect::from_origin_size(origin, element.size),
                        color: self.config.box_color,
                    });
                } else {
                    for &child in children {
                        self.draw_child(tree, child, ctx, origin, primitives)?;
                    }
                }
            }
            ElementKind::Index { content, .. } => {
                self.draw_child(tree, *content, ctx, origin, primitives)?;
                for corner in IndexCorner::ALL {
                    if let Some(slot) = element.kind.corner(corner) {
                        self.draw_child(tree, slot, ctx, origin, primitives)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn draw_child(
        &self,
        tree: &FormulaTree,
        child: ElementId,
        ctx: &StyleContext,
        origin: Point,
        primitives: &mut Vec<RenderPrimitive>,
    ) -> RenderResult<()> {
        let position = tree.get(child)?.position;
        self.draw_element(
            tree,
            child,
            ctx,
            origin.offset(position.x, position.y),
            primitives,
        )
    }

    /// Paint the cursor: a caret line, or the selection band between the
    /// cursor and its mark
    pub fn render_cursor(&self, tree: &FormulaTree, cursor: &Cursor) -> Vec<RenderPrimitive> {
        let owner = cursor.owner();
        let point = tree.global_cursor_pos(owner, cursor.position());
        let height = tree.get(owner).map(|e| e.size.height).unwrap_or(0.0);

        if let Some(mark) = cursor.mark().filter(|_| cursor.is_selecting()) {
            let mark_point = tree.global_cursor_pos(owner, mark);
            let x = point.x.min(mark_point.x);
            let width = (point.x - mark_point.x).abs();
            vec![RenderPrimitive::Selection {
                rect: Rect::new(x, point.y, width, height),
                color: self.config.selection_color,
            }]
        } else {
            vec![RenderPrimitive::Caret {
                x: point.x,
                y: point.y - 2.0,
                height: height + 4.0,
                color: self.config.caret_color,
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formula_model::compute_layout;

    fn laid_out_tree(text: &str) -> (FormulaTree, StyleContext) {
        let mut tree = FormulaTree::new();
        let root = tree.root();
        for ch in text.chars() {
            let g = tree.new_glyph(ch.to_string());
            tree.add_child(root, g).unwrap();
        }
        let ctx = StyleContext::for_size(10.0);
        compute_layout(&mut tree, &ctx);
        (tree, ctx)
    }

    #[test]
    fn test_glyphs_are_emitted_in_reading_order() {
        let (tree, ctx) = laid_out_tree("ab");
        let output = Renderer::new().render(&tree, &ctx, Point::origin()).unwrap();
        let glyphs: Vec<_> = output
            .primitives
            .iter()
            .filter_map(|p| match p {
                RenderPrimitive::Glyph { text, baseline, .. } => {
                    Some((text.clone(), baseline.x))
                }
                _ => None,
            })
            .collect();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].0, "a");
        assert_eq!(glyphs[1].0, "b");
        assert!(glyphs[0].1 < glyphs[1].1);
    }

    #[test]
    fn test_baseline_uses_ascent() {
        let (tree, ctx) = laid_out_tree("a");
        let output = Renderer::new().render(&tree, &ctx, Point::origin()).unwrap();
        match &output.primitives[0] {
            RenderPrimitive::Glyph { baseline, .. } => {
                assert_eq!(baseline.y, ctx.metrics.ascent);
            }
            other => panic!("expected a glyph, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_formula_renders_placeholder_box() {
        let (tree, ctx) = laid_out_tree("");
        let output = Renderer::new().render(&tree, &ctx, Point::origin()).unwrap();
        assert!(matches!(
            output.primitives[0],
            RenderPrimitive::OutlineBox { .. }
        ));
        assert_eq!(output.bounds.width(), 10.0);
    }

    #[test]
    fn test_origin_offsets_everything() {
        let (tree, ctx) = laid_out_tree("a");
        let shifted = Renderer::new()
            .render(&tree, &ctx, Point::new(100.0, 50.0))
            .unwrap();
        match &shifted.primitives[0] {
            RenderPrimitive::Glyph { baseline, .. } => {
                assert_eq!(baseline.x, 100.0);
                assert_eq!(baseline.y, 50.0 + ctx.metrics.ascent);
            }
            other => panic!("expected a glyph, got {other:?}"),
        }
        assert_eq!(shifted.bounds.x(), 100.0);
    }

    #[test]
    fn test_cursor_renders_caret_with_overshoot() {
        let (tree, _) = laid_out_tree("ab");
        let cursor = Cursor::new(tree.root());
        let primitives = Renderer::new().render_cursor(&tree, &cursor);
        match &primitives[0] {
            RenderPrimitive::Caret { x, y, height, .. } => {
                assert_eq!(*x, 0.0);
                assert_eq!(*y, -2.0);
                assert_eq!(*height, 10.0 + 4.0);
            }
            other => panic!("expected a caret, got {other:?}"),
        }
    }

    #[test]
    fn test_cursor_renders_selection_band() {
        let (tree, _) = laid_out_tree("abcd");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 1);
        cursor.set_selecting(true);
        cursor.set(root, 3);
        let primitives = Renderer::new().render_cursor(&tree, &cursor);
        match &primitives[0] {
            RenderPrimitive::Selection { rect, .. } => {
                // Slots 1 and 3 of 5-wide glyphs
                assert_eq!(rect.x(), 5.0);
                assert_eq!(rect.width(), 10.0);
                assert_eq!(rect.height(), 10.0);
            }
            other => panic!("expected a selection band, got {other:?}"),
        }
    }
}
