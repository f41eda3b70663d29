//! Layout pass and hit-testing
//!
//! Layout runs bottom-up: children are sized first, then the container
//! derives its own size and midline and assigns each child's offset. All
//! siblings of a sequence share one baseline; the midline (distance from an
//! element's top edge to its baseline-alignment line) is what makes glyphs
//! and tall index nodes line up.
//!
//! The pass only writes `position`, `size`, and `midline`, so running it
//! twice without an intervening edit is a no-op.

use crate::element::{ElementKind, IndexCorner};
use crate::element_id::ElementId;
use crate::geometry::{Point, Size};
use crate::style::StyleContext;
use crate::tree::FormulaTree;

/// Side length of the placeholder box an empty sequence occupies so it
/// stays visible and clickable
pub const EMPTY_BOX_SIZE: f32 = 10.0;

/// Midline of the placeholder box
pub const EMPTY_BOX_MIDLINE: f32 = 5.0;

/// Recompute size, midline, and child positions for the whole tree
pub fn compute_layout(tree: &mut FormulaTree, ctx: &StyleContext) {
    let root = tree.root();
    layout_element(tree, root, ctx);
}

/// Recompute one element (and its subtree)
pub fn layout_element(tree: &mut FormulaTree, id: ElementId, ctx: &StyleContext) {
    let kind = match tree.get(id) {
        Ok(element) => element.kind.clone(),
        Err(_) => return,
    };
    match kind {
        ElementKind::Glyph { text } => {
            let width = ctx.advance(&text);
            let height = ctx.metrics.line_height();
            set_geometry(tree, id, Size::new(width, height), height / 2.0);
        }
        ElementKind::Sequence { children } => layout_sequence(tree, id, &children, ctx),
        ElementKind::Index {
            content,
            upper_left,
            upper_right,
            lower_left,
            lower_right,
        } => layout_index(
            tree,
            id,
            content,
            [upper_left, upper_right, lower_left, lower_right],
            ctx,
        ),
    }
}

fn layout_sequence(tree: &mut FormulaTree, id: ElementId, children: &[ElementId], ctx: &StyleContext) {
    if children.is_empty() {
        set_geometry(
            tree,
            id,
            Size::new(EMPTY_BOX_SIZE, EMPTY_BOX_SIZE),
            EMPTY_BOX_MIDLINE,
        );
        return;
    }

    let mut width = 0.0f32;
    let mut to_midline = 0.0f32;
    let mut from_midline = 0.0f32;
    for &child in children {
        layout_element(tree, child, ctx);
        let (w, h, midline) = geometry_of(tree, child);
        set_x(tree, child, width);
        width += w;
        to_midline = to_midline.max(midline);
        from_midline = from_midline.max(h - midline);
    }

    set_geometry(tree, id, Size::new(width, to_midline + from_midline), to_midline);

    for &child in children {
        let (_, _, midline) = geometry_of(tree, child);
        set_y(tree, child, to_midline - midline);
    }
}

fn layout_index(
    tree: &mut FormulaTree,
    id: ElementId,
    content: ElementId,
    corners: [Option<ElementId>; 4],
    ctx: &StyleContext,
) {
    let [upper_left, upper_right, lower_left, lower_right] = corners;

    let mut corner_extent = |slot: Option<ElementId>| -> (f32, f32) {
        match slot {
            Some(c) => {
                layout_element(tree, c, ctx);
                let (w, h, _) = geometry_of(tree, c);
                (w, h)
            }
            None => (0.0, 0.0),
        }
    };
    let (ul_width, ul_height) = corner_extent(upper_left);
    let (ur_width, ur_height) = corner_extent(upper_right);
    let (ll_width, ll_height) = corner_extent(lower_left);
    let (lr_width, lr_height) = corner_extent(lower_right);

    layout_element(tree, content, ctx);
    let (content_width, content_height, content_midline) = geometry_of(tree, content);
    let mut width = content_width;
    let mut to_midline = content_midline;
    let mut from_midline = content_height - content_midline;

    // Horizontal: the wider left corner sets the content offset, the
    // narrower one is right-aligned against it.
    if ul_width > ll_width {
        if let Some(c) = upper_left {
            set_x(tree, c, 0.0);
        }
        if let Some(c) = lower_left {
            set_x(tree, c, ul_width - ll_width);
        }
        set_x(tree, content, ul_width);
        width += ul_width;
    } else {
        if let Some(c) = upper_left {
            set_x(tree, c, ll_width - ul_width);
        }
        if let Some(c) = lower_left {
            set_x(tree, c, 0.0);
        }
        set_x(tree, content, ll_width);
        width += ll_width;
    }

    if let Some(c) = upper_right {
        set_x(tree, c, width);
    }
    if let Some(c) = lower_right {
        set_x(tree, c, width);
    }
    width += ur_width.max(lr_width);

    // Vertical: the taller upper corner sets the reference height above
    // the content; the content is pushed down far enough to tuck the
    // corners against its upper half.
    let content_y;
    if ul_height > ur_height {
        if let Some(c) = upper_left {
            set_y(tree, c, 0.0);
        }
        if let Some(c) = upper_right {
            set_y(tree, c, ul_height - ur_height);
        }
        content_y = (ul_height - to_midline / 2.0).max(0.0);
    } else {
        if let Some(c) = upper_left {
            set_y(tree, c, ur_height - ul_height);
        }
        if let Some(c) = upper_right {
            set_y(tree, c, 0.0);
        }
        content_y = (ur_height - to_midline / 2.0).max(0.0);
    }
    set_y(tree, content, content_y);
    to_midline += content_y;

    if let Some(c) = lower_left {
        set_y(tree, c, to_midline + from_midline / 2.0);
    }
    if let Some(c) = lower_right {
        set_y(tree, c, to_midline + from_midline / 2.0);
    }
    from_midline += (ll_height.max(lr_height) - from_midline / 2.0).max(0.0);

    set_geometry(tree, id, Size::new(width, to_midline + from_midline), to_midline);
}

fn geometry_of(tree: &FormulaTree, id: ElementId) -> (f32, f32, f32) {
    tree.get(id)
        .map(|e| (e.size.width, e.size.height, e.midline))
        .unwrap_or((0.0, 0.0, 0.0))
}

fn set_geometry(tree: &mut FormulaTree, id: ElementId, size: Size, midline: f32) {
    if let Ok(element) = tree.get_mut(id) {
        element.size = size;
        element.midline = midline;
    }
}

fn set_x(tree: &mut FormulaTree, id: ElementId, x: f32) {
    if let Ok(element) = tree.get_mut(id) {
        element.position.x = x;
    }
}

fn set_y(tree: &mut FormulaTree, id: ElementId, y: f32) {
    if let Ok(element) = tree.get_mut(id) {
        element.position.y = y;
    }
}

// =============================================================================
// Hit-testing
// =============================================================================

/// Find the deepest element whose box contains `point`, with `origin` the
/// absolute position of `id`. Returns `None` when the point falls outside
/// the element entirely.
pub fn element_at(
    tree: &FormulaTree,
    id: ElementId,
    point: Point,
    origin: Point,
) -> Option<ElementId> {
    let element = tree.get(id).ok()?;
    let local_x = point.x - origin.x;
    if local_x < 0.0 || local_x >= element.size.width {
        return None;
    }
    let local_y = point.y - origin.y;
    if local_y < 0.0 || local_y >= element.size.height {
        return None;
    }

    match &element.kind {
        ElementKind::Glyph { .. } => Some(id),
        ElementKind::Sequence { children } => {
            for &child in children {
                if let Some(hit) = probe_child(tree, child, point, origin) {
                    return Some(hit);
                }
            }
            Some(id)
        }
        ElementKind::Index { content, .. } => {
            let probes = [
                Some(*content),
                element.kind.corner(IndexCorner::UpperRight),
                element.kind.corner(IndexCorner::UpperLeft),
                element.kind.corner(IndexCorner::LowerRight),
                element.kind.corner(IndexCorner::LowerLeft),
            ];
            for child in probes.into_iter().flatten() {
                if let Some(hit) = probe_child(tree, child, point, origin) {
                    return Some(hit);
                }
            }
            Some(id)
        }
    }
}

fn probe_child(
    tree: &FormulaTree,
    child: ElementId,
    point: Point,
    origin: Point,
) -> Option<ElementId> {
    let position = tree.get(child).ok()?.position;
    element_at(tree, child, point, origin.offset(position.x, position.y))
}
