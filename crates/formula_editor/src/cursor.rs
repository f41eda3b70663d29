//! The cursor: an insertion point in a sequence, with an optional
//! selection anchor
//!
//! The cursor never knows how to move itself; elements do. Navigation
//! hands the cursor from element to element (see [`crate::navigate`]),
//! and each element calls [`Cursor::set`] when it has found the slot the
//! cursor should land in.

use crate::navigate;
use formula_model::{ElementId, FormulaTree};
use serde::{Deserialize, Serialize};

/// Cursor state: the owning sequence, the slot between its children, and
/// the selection bookkeeping.
///
/// `position` counts insertion points: 0 is before the first child,
/// `child_count` is after the last. A selection is the half-open child
/// range between `position` and `mark`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    owner: ElementId,
    position: usize,
    mark: Option<usize>,
    selecting: bool,
    mouse_mark: bool,
}

impl Cursor {
    /// A cursor at the start of the given sequence
    pub fn new(owner: ElementId) -> Self {
        Self {
            owner,
            position: 0,
            mark: None,
            selecting: false,
            mouse_mark: false,
        }
    }

    /// The sequence currently interpreting `position`
    pub fn owner(&self) -> ElementId {
        self.owner
    }

    /// The insertion slot within the owner
    pub fn position(&self) -> usize {
        self.position
    }

    /// The fixed end of the selection, if one was anchored
    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    /// Whether a selection is being built or held
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Whether a mouse drag currently owns the selection anchor
    pub fn is_mouse_mark(&self) -> bool {
        self.mouse_mark
    }

    /// Turn selection mode on or off (shift state, drag state)
    pub fn set_selecting(&mut self, selecting: bool) {
        self.selecting = selecting;
    }

    /// Mark the selection anchor as mouse-owned (or release it)
    pub fn set_mouse_mark(&mut self, mouse_mark: bool) {
        self.mouse_mark = mouse_mark;
    }

    /// Move the cursor to a new slot. The single mutation primitive used
    /// by element navigation: when a selection is in progress the previous
    /// position becomes the anchor on the first move, and landing exactly
    /// on the anchor collapses the selection again.
    pub fn set(&mut self, owner: ElementId, position: usize) {
        if self.selecting {
            if self.mark.is_none() {
                self.mark = Some(self.position);
            }
            if self.mark == Some(position) {
                self.selecting = false;
            }
        } else {
            self.mark = None;
        }
        self.owner = owner;
        self.position = position;
    }

    /// Place (or clear) the selection anchor directly. Used by elements
    /// when the cursor climbs out of a child and by mouse handling.
    pub fn set_mark(&mut self, mark: Option<usize>) {
        self.selecting = mark.is_some();
        self.mark = mark;
    }

    /// The selected child range of the owner as `(from, to)`, half-open,
    /// ends normalized. `None` when no selection is active.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        if !self.selecting {
            return None;
        }
        self.mark
            .map(|mark| (mark.min(self.position), mark.max(self.position)))
    }

    /// Check the cursor invariant against a tree: the owner is an attached
    /// sequence and the position is a valid insertion point.
    pub fn validate(&self, tree: &FormulaTree) -> bool {
        tree.get(self.owner).map(|e| e.is_sequence()).unwrap_or(false)
            && tree.is_attached(self.owner)
            && self.position <= tree.child_count(self.owner)
    }

    /// Relocate the cursor before `removed` is detached from the tree.
    /// If the cursor sits anywhere inside the doomed subtree it is moved
    /// just past the subtree's slot in its parent, then homed there. Must
    /// be called while the tree still contains `removed`.
    pub fn element_removed(&mut self, tree: &FormulaTree, removed: ElementId) {
        let mut current = Some(self.owner);
        while let Some(id) = current {
            if id == removed {
                if let Some(parent) = tree.parent(id) {
                    navigate::move_right(tree, self, parent, id);
                    let owner = self.owner;
                    navigate::move_home(tree, self, owner);
                }
                return;
            }
            current = tree.parent(id);
        }
    }

    /// The index element the cursor can extend with another corner: either
    /// the element immediately before the cursor, or the enclosing index
    /// when the cursor sits at the last slot of that index's content.
    pub fn find_index_element(&self, tree: &FormulaTree) -> Option<ElementId> {
        if self.position > 0 {
            if let Some(&before) = tree.children(self.owner).get(self.position - 1) {
                if tree.get(before).map(|e| e.is_index()).unwrap_or(false) {
                    return Some(before);
                }
            }
        }
        if self.position == tree.child_count(self.owner) {
            if let Some(parent) = tree.parent(self.owner) {
                if tree.get(parent).map(|e| e.is_index()).unwrap_or(false)
                    && tree.main_child(parent) == Some(self.owner)
                {
                    return Some(parent);
                }
            }
        }
        None
    }
}
