//! Directional navigation over the element tree
//!
//! Every move is a hand-off: `move_left(tree, cursor, target, from)` asks
//! `target` to find the next cursor slot, given that the request arrived
//! from the neighbor `from`. Each element kind first classifies the caller
//! (its parent, itself, or one of its named children) and then routes the
//! cursor: glyphs always bounce the request back up, sequences walk their
//! child slots, and index nodes route between their corners and content.
//!
//! Navigation is total: an unrecognized caller escalates to the parent
//! rather than failing, and a move that runs off the formula root simply
//! leaves the cursor where it is.

use crate::cursor::Cursor;
use formula_model::{ElementId, ElementKind, FormulaTree, IndexCorner};

/// Which neighbor handed the cursor to a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceNeighbor {
    /// The parent is entering from outside
    Parent,
    /// The sequence already owns the cursor
    Current,
    /// The child at this slot is handing the cursor back up
    Child(usize),
    /// Anyone else; treated as an exit request
    Other,
}

fn classify_sequence(tree: &FormulaTree, seq: ElementId, from: ElementId) -> SequenceNeighbor {
    if tree.parent(seq) == Some(from) {
        SequenceNeighbor::Parent
    } else if from == seq {
        SequenceNeighbor::Current
    } else if let Some(slot) = tree.child_index(seq, from) {
        SequenceNeighbor::Child(slot)
    } else {
        SequenceNeighbor::Other
    }
}

/// Which neighbor handed the cursor to an index element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexNeighbor {
    Parent,
    Content,
    Corner(IndexCorner),
    Other,
}

fn classify_index(tree: &FormulaTree, index: ElementId, from: ElementId) -> IndexNeighbor {
    if tree.parent(index) == Some(from) {
        IndexNeighbor::Parent
    } else if tree.content_of(index) == Some(from) {
        IndexNeighbor::Content
    } else if let Some(corner) = tree.corner_holding(index, from) {
        IndexNeighbor::Corner(corner)
    } else {
        IndexNeighbor::Other
    }
}

// =============================================================================
// Dispatch
// =============================================================================

pub fn move_left(tree: &FormulaTree, cursor: &mut Cursor, target: ElementId, from: ElementId) {
    match tree.get(target).map(|e| &e.kind) {
        Ok(ElementKind::Sequence { .. }) => sequence_move_left(tree, cursor, target, from),
        Ok(ElementKind::Index { .. }) => index_move_left(tree, cursor, target, from),
        Ok(ElementKind::Glyph { .. }) => delegate_to_parent(tree, cursor, target, move_left),
        Err(_) => {}
    }
}

pub fn move_right(tree: &FormulaTree, cursor: &mut Cursor, target: ElementId, from: ElementId) {
    match tree.get(target).map(|e| &e.kind) {
        Ok(ElementKind::Sequence { .. }) => sequence_move_right(tree, cursor, target, from),
        Ok(ElementKind::Index { .. }) => index_move_right(tree, cursor, target, from),
        Ok(ElementKind::Glyph { .. }) => delegate_to_parent(tree, cursor, target, move_right),
        Err(_) => {}
    }
}

pub fn move_up(tree: &FormulaTree, cursor: &mut Cursor, target: ElementId, from: ElementId) {
    match tree.get(target).map(|e| &e.kind) {
        Ok(ElementKind::Sequence { .. }) => sequence_move_up(tree, cursor, target, from),
        Ok(ElementKind::Index { .. }) => index_move_up(tree, cursor, target, from),
        Ok(ElementKind::Glyph { .. }) => delegate_to_parent(tree, cursor, target, move_up),
        Err(_) => {}
    }
}

pub fn move_down(tree: &FormulaTree, cursor: &mut Cursor, target: ElementId, from: ElementId) {
    match tree.get(target).map(|e| &e.kind) {
        Ok(ElementKind::Sequence { .. }) => sequence_move_down(tree, cursor, target, from),
        Ok(ElementKind::Index { .. }) => index_move_down(tree, cursor, target, from),
        Ok(ElementKind::Glyph { .. }) => delegate_to_parent(tree, cursor, target, move_down),
        Err(_) => {}
    }
}

/// Leaves never hold the cursor; every request bounces to the parent
fn delegate_to_parent(
    tree: &FormulaTree,
    cursor: &mut Cursor,
    target: ElementId,
    mover: fn(&FormulaTree, &mut Cursor, ElementId, ElementId),
) {
    if let Some(parent) = tree.parent(target) {
        mover(tree, cursor, parent, target);
    }
}

// =============================================================================
// Sequence navigation
// =============================================================================

fn sequence_move_left(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId, from: ElementId) {
    match classify_sequence(tree, seq, from) {
        SequenceNeighbor::Parent => {
            // Entering from the right edge
            cursor.set(seq, tree.child_count(seq));
        }
        SequenceNeighbor::Current => {
            let position = cursor.position();
            if position > 0 {
                if cursor.is_selecting() {
                    cursor.set(seq, position - 1);
                } else if let Some(&child) = tree.children(seq).get(position - 1) {
                    move_left(tree, cursor, child, seq);
                } else {
                    delegate_to_parent(tree, cursor, seq, move_left);
                }
            } else {
                delegate_to_parent(tree, cursor, seq, move_left);
            }
        }
        SequenceNeighbor::Child(slot) => {
            cursor.set(seq, slot);
            if cursor.is_selecting() && !cursor.is_mouse_mark() {
                cursor.set_mark(Some(slot + 1));
            }
        }
        SequenceNeighbor::Other => delegate_to_parent(tree, cursor, seq, move_left),
    }
}

fn sequence_move_right(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId, from: ElementId) {
    match classify_sequence(tree, seq, from) {
        SequenceNeighbor::Parent => {
            // Entering from the left edge
            cursor.set(seq, 0);
        }
        SequenceNeighbor::Current => {
            let position = cursor.position();
            if position < tree.child_count(seq) {
                if cursor.is_selecting() {
                    cursor.set(seq, position + 1);
                } else if let Some(&child) = tree.children(seq).get(position) {
                    move_right(tree, cursor, child, seq);
                } else {
                    delegate_to_parent(tree, cursor, seq, move_right);
                }
            } else {
                delegate_to_parent(tree, cursor, seq, move_right);
            }
        }
        SequenceNeighbor::Child(slot) => {
            cursor.set(seq, slot + 1);
            if cursor.is_selecting() && !cursor.is_mouse_mark() {
                cursor.set_mark(Some(slot));
            }
        }
        SequenceNeighbor::Other => delegate_to_parent(tree, cursor, seq, move_right),
    }
}

fn sequence_move_up(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId, from: ElementId) {
    // A single sequence has no vertical neighbors; entering from above
    // re-enters horizontally, anything else escalates until an index
    // intercepts the move.
    match classify_sequence(tree, seq, from) {
        SequenceNeighbor::Parent => sequence_move_right(tree, cursor, seq, seq),
        _ => delegate_to_parent(tree, cursor, seq, move_up),
    }
}

fn sequence_move_down(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId, from: ElementId) {
    match classify_sequence(tree, seq, from) {
        SequenceNeighbor::Parent => sequence_move_right(tree, cursor, seq, seq),
        _ => delegate_to_parent(tree, cursor, seq, move_down),
    }
}

/// Jump to the first slot of `seq`. An active selection started inside a
/// nested child keeps its anchor: the anchor becomes the slot just past
/// the child subtree the cursor came from.
pub fn move_home(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId) {
    if cursor.is_selecting() {
        let owner = cursor.owner();
        if owner != seq {
            let mut element = owner;
            loop {
                match tree.parent(element) {
                    Some(parent) if parent == seq => {
                        if let Some(slot) = tree.child_index(seq, element) {
                            cursor.set_mark(Some(slot + 1));
                        }
                        break;
                    }
                    Some(parent) => element = parent,
                    None => break,
                }
            }
        }
    }
    cursor.set(seq, 0);
}

/// Jump past the last slot of `seq`; the mirror of [`move_home`]
pub fn move_end(tree: &FormulaTree, cursor: &mut Cursor, seq: ElementId) {
    if cursor.is_selecting() {
        let owner = cursor.owner();
        if owner != seq {
            let mut element = owner;
            loop {
                match tree.parent(element) {
                    Some(parent) if parent == seq => {
                        if let Some(slot) = tree.child_index(seq, element) {
                            cursor.set_mark(Some(slot));
                        }
                        break;
                    }
                    Some(parent) => element = parent,
                    None => break,
                }
            }
        }
    }
    cursor.set(seq, tree.child_count(seq));
}

// =============================================================================
// Index navigation
// =============================================================================

fn index_move_left(tree: &FormulaTree, cursor: &mut Cursor, index: ElementId, from: ElementId) {
    // Selections never dive into index corners
    if cursor.is_selecting() {
        delegate_to_parent(tree, cursor, index, move_left);
        return;
    }
    let Some(content) = tree.content_of(index) else {
        return;
    };
    let corner = |c| tree.corner(index, c);
    match classify_index(tree, index, from) {
        IndexNeighbor::Parent => {
            if let Some(c) = corner(IndexCorner::LowerRight) {
                move_left(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::UpperRight) {
                move_left(tree, cursor, c, index);
            } else {
                move_left(tree, cursor, content, index);
            }
        }
        IndexNeighbor::Corner(IndexCorner::LowerRight) => {
            if let Some(c) = corner(IndexCorner::UpperRight) {
                move_left(tree, cursor, c, index);
            } else {
                move_left(tree, cursor, content, index);
            }
        }
        IndexNeighbor::Corner(IndexCorner::UpperRight) => {
            move_left(tree, cursor, content, index);
        }
        IndexNeighbor::Content => {
            if let Some(c) = corner(IndexCorner::LowerLeft) {
                move_left(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::UpperLeft) {
                move_left(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_left);
            }
        }
        IndexNeighbor::Corner(IndexCorner::LowerLeft) => {
            if let Some(c) = corner(IndexCorner::UpperLeft) {
                move_left(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_left);
            }
        }
        IndexNeighbor::Corner(IndexCorner::UpperLeft) | IndexNeighbor::Other => {
            delegate_to_parent(tree, cursor, index, move_left);
        }
    }
}

fn index_move_right(tree: &FormulaTree, cursor: &mut Cursor, index: ElementId, from: ElementId) {
    if cursor.is_selecting() {
        delegate_to_parent(tree, cursor, index, move_right);
        return;
    }
    let Some(content) = tree.content_of(index) else {
        return;
    };
    let corner = |c| tree.corner(index, c);
    match classify_index(tree, index, from) {
        IndexNeighbor::Parent => {
            if let Some(c) = corner(IndexCorner::UpperLeft) {
                move_right(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::LowerLeft) {
                move_right(tree, cursor, c, index);
            } else {
                move_right(tree, cursor, content, index);
            }
        }
        IndexNeighbor::Corner(IndexCorner::UpperLeft) => {
            if let Some(c) = corner(IndexCorner::LowerLeft) {
                move_right(tree, cursor, c, index);
            } else {
                move_right(tree, cursor, content, index);
            }
        }
        IndexNeighbor::Corner(IndexCorner::LowerLeft) => {
            move_right(tree, cursor, content, index);
        }
        IndexNeighbor::Content => {
            if let Some(c) = corner(IndexCorner::UpperRight) {
                move_right(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::LowerRight) {
                move_right(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_right);
            }
        }
        IndexNeighbor::Corner(IndexCorner::UpperRight) => {
            if let Some(c) = corner(IndexCorner::LowerRight) {
                move_right(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_right);
            }
        }
        IndexNeighbor::Corner(IndexCorner::LowerRight) | IndexNeighbor::Other => {
            delegate_to_parent(tree, cursor, index, move_right);
        }
    }
}

fn index_move_up(tree: &FormulaTree, cursor: &mut Cursor, index: ElementId, from: ElementId) {
    let Some(content) = tree.content_of(index) else {
        return;
    };
    let corner = |c| tree.corner(index, c);
    match classify_index(tree, index, from) {
        IndexNeighbor::Parent => move_right(tree, cursor, content, index),
        IndexNeighbor::Corner(IndexCorner::UpperLeft)
        | IndexNeighbor::Corner(IndexCorner::UpperRight) => {
            // Already on the top row
            delegate_to_parent(tree, cursor, index, move_up);
        }
        IndexNeighbor::Content => {
            if let Some(c) = corner(IndexCorner::UpperRight) {
                move_right(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::UpperLeft) {
                move_left(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_up);
            }
        }
        IndexNeighbor::Corner(IndexCorner::LowerLeft) => move_right(tree, cursor, content, index),
        IndexNeighbor::Corner(IndexCorner::LowerRight) => move_left(tree, cursor, content, index),
        IndexNeighbor::Other => delegate_to_parent(tree, cursor, index, move_up),
    }
}

fn index_move_down(tree: &FormulaTree, cursor: &mut Cursor, index: ElementId, from: ElementId) {
    let Some(content) = tree.content_of(index) else {
        return;
    };
    let corner = |c| tree.corner(index, c);
    match classify_index(tree, index, from) {
        IndexNeighbor::Parent => move_right(tree, cursor, content, index),
        IndexNeighbor::Corner(IndexCorner::LowerLeft)
        | IndexNeighbor::Corner(IndexCorner::LowerRight) => {
            // Already on the bottom row
            delegate_to_parent(tree, cursor, index, move_down);
        }
        IndexNeighbor::Content => {
            if let Some(c) = corner(IndexCorner::LowerRight) {
                move_right(tree, cursor, c, index);
            } else if let Some(c) = corner(IndexCorner::LowerLeft) {
                move_left(tree, cursor, c, index);
            } else {
                delegate_to_parent(tree, cursor, index, move_down);
            }
        }
        IndexNeighbor::Corner(IndexCorner::UpperLeft) => move_right(tree, cursor, content, index),
        IndexNeighbor::Corner(IndexCorner::UpperRight) => move_left(tree, cursor, content, index),
        IndexNeighbor::Other => delegate_to_parent(tree, cursor, index, move_down),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_tree(text: &str) -> FormulaTree {
        let mut tree = FormulaTree::new();
        let root = tree.root();
        for ch in text.chars() {
            let g = tree.new_glyph(ch.to_string());
            tree.add_child(root, g).unwrap();
        }
        tree
    }

    /// Root holds [x, Index(content=[e], upper_right=[n]), y]
    fn tree_with_index() -> (FormulaTree, ElementId) {
        let mut tree = FormulaTree::new();
        let root = tree.root();
        let x = tree.new_glyph("x");
        tree.add_child(root, x).unwrap();
        let idx = tree.new_index();
        let content = tree.content_of(idx).unwrap();
        let e = tree.new_glyph("e");
        tree.add_child(content, e).unwrap();
        let ur = tree.require_corner(idx, IndexCorner::UpperRight).unwrap();
        let n = tree.new_glyph("n");
        tree.add_child(ur, n).unwrap();
        tree.add_child(root, idx).unwrap();
        let y = tree.new_glyph("y");
        tree.add_child(root, y).unwrap();
        (tree, idx)
    }

    #[test]
    fn test_move_right_steps_over_glyphs() {
        let tree = flat_tree("ab");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        move_right(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 1));
        move_right(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 2));
        // At the end of the root there is nowhere further to go
        move_right(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 2));
    }

    #[test]
    fn test_move_left_stops_at_root_start() {
        let tree = flat_tree("ab");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        move_left(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 0));
    }

    #[test]
    fn test_right_then_left_round_trips() {
        let tree = flat_tree("abc");
        let root = tree.root();
        for start in 0..2 {
            let mut cursor = Cursor::new(root);
            cursor.set(root, start);
            move_right(&tree, &mut cursor, root, root);
            move_left(&tree, &mut cursor, root, root);
            assert_eq!((cursor.owner(), cursor.position()), (root, start));
        }
    }

    #[test]
    fn test_move_right_enters_index_content() {
        // No left corners here, so entering from the left lands in content
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let content = tree.content_of(idx).unwrap();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 1);
        move_right(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (content, 0));
    }

    #[test]
    fn test_move_right_through_whole_index() {
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let content = tree.content_of(idx).unwrap();
        let ur = tree.corner(idx, IndexCorner::UpperRight).unwrap();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 1);

        // Into content, over the glyph, up into the exponent, over its
        // glyph, and back out after the index.
        move_right(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (content, 0));
        move_right(&tree, &mut cursor, content, content);
        assert_eq!((cursor.owner(), cursor.position()), (content, 1));
        move_right(&tree, &mut cursor, content, content);
        assert_eq!((cursor.owner(), cursor.position()), (ur, 0));
        move_right(&tree, &mut cursor, ur, ur);
        assert_eq!((cursor.owner(), cursor.position()), (ur, 1));
        move_right(&tree, &mut cursor, ur, ur);
        assert_eq!((cursor.owner(), cursor.position()), (root, 2));
    }

    #[test]
    fn test_move_left_enters_index_from_the_right() {
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let ur = tree.corner(idx, IndexCorner::UpperRight).unwrap();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 2);
        move_left(&tree, &mut cursor, root, root);
        // The upper-right corner is the rightmost stop, entered at its end
        assert_eq!((cursor.owner(), cursor.position()), (ur, 1));
    }

    #[test]
    fn test_index_round_trip_through_corner() {
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 2);
        move_left(&tree, &mut cursor, root, root);
        let after_entry = (cursor.owner(), cursor.position());
        let cur = cursor.owner();
        move_left(&tree, &mut cursor, cur, cur);
        let cur = cursor.owner();
        move_right(&tree, &mut cursor, cur, cur);
        assert_eq!((cursor.owner(), cursor.position()), after_entry);
        let _ = idx;
    }

    #[test]
    fn test_move_up_from_content_enters_upper_right() {
        let (tree, idx) = tree_with_index();
        let content = tree.content_of(idx).unwrap();
        let ur = tree.corner(idx, IndexCorner::UpperRight).unwrap();
        let mut cursor = Cursor::new(content);
        move_up(&tree, &mut cursor, content, content);
        assert_eq!((cursor.owner(), cursor.position()), (ur, 0));
    }

    #[test]
    fn test_move_down_from_upper_corner_returns_to_content() {
        let (tree, idx) = tree_with_index();
        let content = tree.content_of(idx).unwrap();
        let ur = tree.corner(idx, IndexCorner::UpperRight).unwrap();
        let mut cursor = Cursor::new(ur);
        move_down(&tree, &mut cursor, ur, ur);
        // Entering from the upper-right means entering content at its end
        assert_eq!(
            (cursor.owner(), cursor.position()),
            (content, tree.child_count(content))
        );
    }

    #[test]
    fn test_move_up_at_root_is_a_no_op() {
        let tree = flat_tree("a");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 1);
        move_up(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 1));
    }

    #[test]
    fn test_selection_skips_over_index() {
        // With a selection active, stepping left over an index element
        // must not dive into its corners.
        let (tree, _) = tree_with_index();
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 2);
        cursor.set_selecting(true);
        move_left(&tree, &mut cursor, root, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 1));
        assert_eq!(cursor.selection_range(), Some((1, 2)));
    }

    #[test]
    fn test_selection_extends_one_slot_at_a_time() {
        let tree = flat_tree("abcd");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        cursor.set(root, 3);
        cursor.set_selecting(true);
        move_left(&tree, &mut cursor, root, root);
        move_left(&tree, &mut cursor, root, root);
        assert_eq!(cursor.selection_range(), Some((1, 3)));
    }

    #[test]
    fn test_exiting_child_anchors_selection() {
        // Cursor inside the index content; shift-right climbs out and
        // anchors the selection around the index element.
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let content = tree.content_of(idx).unwrap();
        let mut cursor = Cursor::new(content);
        cursor.set(content, tree.child_count(content));
        cursor.set_selecting(true);
        move_right(&tree, &mut cursor, content, content);
        assert_eq!((cursor.owner(), cursor.position()), (root, 2));
        assert_eq!(cursor.selection_range(), Some((1, 2)));
    }

    #[test]
    fn test_move_home_and_end() {
        let tree = flat_tree("abc");
        let root = tree.root();
        let mut cursor = Cursor::new(root);
        move_end(&tree, &mut cursor, root);
        assert_eq!(cursor.position(), 3);
        move_home(&tree, &mut cursor, root);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_move_home_keeps_nested_selection_anchor() {
        let (tree, idx) = tree_with_index();
        let root = tree.root();
        let content = tree.content_of(idx).unwrap();
        let mut cursor = Cursor::new(content);
        cursor.set(content, 1);
        cursor.set_selecting(true);
        move_home(&tree, &mut cursor, root);
        assert_eq!((cursor.owner(), cursor.position()), (root, 0));
        // The anchor lands just past the index subtree the cursor was in
        assert_eq!(cursor.mark(), Some(2));
        assert_eq!(cursor.selection_range(), Some((0, 2)));
    }

    #[test]
    fn test_four_corner_traversal_order_left() {
        // All four corners populated: stepping left from after the index
        // visits lower-right, upper-right, content, lower-left, upper-left.
        let mut tree = FormulaTree::new();
        let root = tree.root();
        let idx = tree.new_index();
        let content = tree.content_of(idx).unwrap();
        let h = tree.new_glyph("#");
        tree.add_child(content, h).unwrap();
        let mut slots = Vec::new();
        for corner in [
            IndexCorner::LowerRight,
            IndexCorner::UpperRight,
            IndexCorner::LowerLeft,
            IndexCorner::UpperLeft,
        ] {
            let s = tree.require_corner(idx, corner).unwrap();
            let g = tree.new_glyph("i");
            tree.add_child(s, g).unwrap();
            slots.push(s);
        }
        tree.add_child(root, idx).unwrap();
        let (lr, ur, ll, ul) = (slots[0], slots[1], slots[2], slots[3]);

        let mut cursor = Cursor::new(root);
        cursor.set(root, 1);
        let visit = |expected: ElementId, expected_pos: usize, c: &mut Cursor, t: &FormulaTree| {
            move_left(t, c, c.owner(), c.owner());
            assert_eq!((c.owner(), c.position()), (expected, expected_pos));
        };
        // Enter at the end of lower-right, then hop corner to corner,
        // skipping over each single glyph on the way.
        visit(lr, 1, &mut cursor, &tree);
        visit(lr, 0, &mut cursor, &tree);
        visit(ur, 1, &mut cursor, &tree);
        visit(ur, 0, &mut cursor, &tree);
        visit(content, 1, &mut cursor, &tree);
        visit(content, 0, &mut cursor, &tree);
        visit(ll, 1, &mut cursor, &tree);
        visit(ll, 0, &mut cursor, &tree);
        visit(ul, 1, &mut cursor, &tree);
        visit(ul, 0, &mut cursor, &tree);
        // And finally out to the root's left edge
        visit(root, 0, &mut cursor, &tree);
    }
}
