//! Formula tree storage and structural operations
//!
//! The tree owns every element in a storage map keyed by [`ElementId`];
//! parent links are plain id fields, so re-parenting on structural edits is
//! a handle update rather than an ownership transfer. The root is always a
//! sequence and is the only element without a parent.
//!
//! Structural mutations notify the host through a [`DocumentSink`]:
//! `changed` after any layout-invalidating edit, and `element_removed`
//! *before* an element is detached, so the host can relocate anything still
//! pointing into the doomed subtree.

use crate::element::{Element, ElementKind, IndexCorner};
use crate::element_id::ElementId;
use crate::error::{FormulaError, FormulaResult};
use crate::geometry::Point;
use std::collections::HashMap;

/// Host-side receiver for change notifications
pub trait DocumentSink {
    /// A structural or layout-invalidating edit happened
    fn changed(&mut self);

    /// Called just before `id` is detached from the tree. The tree still
    /// contains the element when this fires.
    fn element_removed(&mut self, id: ElementId);
}

/// A sink that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DocumentSink for NullSink {
    fn changed(&mut self) {}
    fn element_removed(&mut self, _id: ElementId) {}
}

/// The element tree of one formula
pub struct FormulaTree {
    elements: HashMap<ElementId, Element>,
    root: ElementId,
    sink: Box<dyn DocumentSink>,
}

impl std::fmt::Debug for FormulaTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaTree")
            .field("root", &self.root)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

impl Default for FormulaTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaTree {
    /// Create an empty formula (a bare root sequence) with no host sink
    pub fn new() -> Self {
        Self::with_sink(Box::new(NullSink))
    }

    /// Create an empty formula bound to a host sink
    pub fn with_sink(sink: Box<dyn DocumentSink>) -> Self {
        let root = ElementId::new();
        let mut elements = HashMap::new();
        elements.insert(root, Element::sequence());
        Self {
            elements,
            root,
            sink,
        }
    }

    /// The root sequence
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of live elements, the root included
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> FormulaResult<&Element> {
        self.elements
            .get(&id)
            .ok_or(FormulaError::UnknownElement(id))
    }

    pub fn get_mut(&mut self, id: ElementId) -> FormulaResult<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(FormulaError::UnknownElement(id))
    }

    /// The parent of an element, if it has one
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    /// Whether the element is reachable from the root via parent links
    pub fn is_attached(&self, id: ElementId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return self.contains(id);
            }
            match self.parent(current) {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    // =========================================================================
    // Child access
    // =========================================================================

    /// The children of a sequence. Empty for any other (or unknown) element,
    /// which keeps navigation and layout total over malformed callers.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.elements.get(&id).map(|e| &e.kind) {
            Some(ElementKind::Sequence { children }) => children,
            _ => &[],
        }
    }

    /// Number of children of a sequence
    pub fn child_count(&self, id: ElementId) -> usize {
        self.children(id).len()
    }

    /// Index of `child` within the sequence `seq`
    pub fn child_index(&self, seq: ElementId, child: ElementId) -> Option<usize> {
        self.children(seq).iter().position(|&c| c == child)
    }

    fn sequence_children_mut(&mut self, id: ElementId) -> FormulaResult<&mut Vec<ElementId>> {
        match self.get_mut(id)? {
            Element {
                kind: ElementKind::Sequence { children },
                ..
            } => Ok(children),
            _ => Err(FormulaError::NotASequence(id)),
        }
    }

    /// The content sequence of an index element
    pub fn content_of(&self, id: ElementId) -> Option<ElementId> {
        match self.elements.get(&id).map(|e| &e.kind) {
            Some(ElementKind::Index { content, .. }) => Some(*content),
            _ => None,
        }
    }

    /// The sequence in a corner slot of an index element, if populated
    pub fn corner(&self, id: ElementId, corner: IndexCorner) -> Option<ElementId> {
        self.elements
            .get(&id)
            .and_then(|e| e.kind.corner(corner))
    }

    /// Which corner slot of `index` holds `child`, if any
    pub fn corner_holding(&self, index: ElementId, child: ElementId) -> Option<IndexCorner> {
        IndexCorner::ALL
            .into_iter()
            .find(|&c| self.corner(index, c) == Some(child))
    }

    /// Whether any corner slot of an index element is populated
    pub fn has_any_corner(&self, id: ElementId) -> bool {
        IndexCorner::ALL
            .into_iter()
            .any(|c| self.corner(id, c).is_some())
    }

    /// The child representing this element simplified to one sequence:
    /// the first child of a sequence, the content of an index, nothing
    /// for a glyph.
    pub fn main_child(&self, id: ElementId) -> Option<ElementId> {
        match self.elements.get(&id).map(|e| &e.kind) {
            Some(ElementKind::Sequence { children }) => children.first().copied(),
            Some(ElementKind::Index { content, .. }) => Some(*content),
            _ => None,
        }
    }

    // =========================================================================
    // Element creation (unattached until placed in a container)
    // =========================================================================

    /// Allocate a glyph leaf
    pub fn new_glyph(&mut self, text: impl Into<String>) -> ElementId {
        let id = ElementId::new();
        self.elements.insert(id, Element::glyph(text));
        id
    }

    /// Allocate an empty sequence
    pub fn new_sequence(&mut self) -> ElementId {
        let id = ElementId::new();
        self.elements.insert(id, Element::sequence());
        id
    }

    /// Allocate an index element with a fresh empty content sequence.
    /// The content slot is always populated.
    pub fn new_index(&mut self) -> ElementId {
        let content = self.new_sequence();
        let id = ElementId::new();
        self.elements.insert(id, Element::index(content));
        if let Some(c) = self.elements.get_mut(&content) {
            c.parent = Some(id);
        }
        id
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    /// Append a child to a sequence and re-parent it
    pub fn add_child(&mut self, seq: ElementId, child: ElementId) -> FormulaResult<()> {
        self.get(child)?;
        self.sequence_children_mut(seq)?.push(child);
        self.get_mut(child)?.parent = Some(seq);
        self.notify_changed();
        Ok(())
    }

    /// Insert a child at a slot of a sequence and re-parent it
    pub fn insert_child_at(
        &mut self,
        seq: ElementId,
        slot: usize,
        child: ElementId,
    ) -> FormulaResult<()> {
        self.get(child)?;
        let children = self.sequence_children_mut(seq)?;
        if slot > children.len() {
            return Err(FormulaError::SlotOutOfRange {
                slot,
                len: children.len(),
            });
        }
        children.insert(slot, child);
        self.get_mut(child)?.parent = Some(seq);
        self.notify_changed();
        Ok(())
    }

    /// Overwrite the child at a slot with a new element, returning the
    /// previous occupant. The previous occupant's parent link is left
    /// untouched: callers moving a child elsewhere re-parent it first.
    pub fn replace_child_at(
        &mut self,
        seq: ElementId,
        slot: usize,
        child: ElementId,
    ) -> FormulaResult<ElementId> {
        self.get(child)?;
        let children = self.sequence_children_mut(seq)?;
        if slot >= children.len() {
            return Err(FormulaError::SlotOutOfRange {
                slot,
                len: children.len(),
            });
        }
        let old = children[slot];
        children[slot] = child;
        self.get_mut(child)?.parent = Some(seq);
        self.notify_changed();
        Ok(old)
    }

    /// Unlink the child at a slot without disposing of it or notifying the
    /// sink; higher layers orchestrate removal notifications.
    pub fn detach_child_at(&mut self, seq: ElementId, slot: usize) -> FormulaResult<ElementId> {
        let children = self.sequence_children_mut(seq)?;
        if slot >= children.len() {
            return Err(FormulaError::SlotOutOfRange {
                slot,
                len: children.len(),
            });
        }
        let child = children.remove(slot);
        if let Some(c) = self.elements.get_mut(&child) {
            c.parent = None;
        }
        Ok(child)
    }

    /// Get the corner sequence of an index element, creating it on first use
    pub fn require_corner(
        &mut self,
        index: ElementId,
        corner: IndexCorner,
    ) -> FormulaResult<ElementId> {
        if let Some(existing) = self.corner(index, corner) {
            return Ok(existing);
        }
        if !self.get(index)?.is_index() {
            return Err(FormulaError::NotAnIndex(index));
        }
        let seq = self.new_sequence();
        self.set_corner_slot(index, corner, Some(seq))?;
        self.get_mut(seq)?.parent = Some(index);
        self.notify_changed();
        Ok(seq)
    }

    /// Empty a corner slot, returning the detached sequence. Does not
    /// dispose of it or notify the sink.
    pub fn clear_corner(
        &mut self,
        index: ElementId,
        corner: IndexCorner,
    ) -> FormulaResult<Option<ElementId>> {
        let old = self.corner(index, corner);
        self.set_corner_slot(index, corner, None)?;
        if let Some(id) = old {
            if let Some(e) = self.elements.get_mut(&id) {
                e.parent = None;
            }
        }
        Ok(old)
    }

    fn set_corner_slot(
        &mut self,
        index: ElementId,
        corner: IndexCorner,
        value: Option<ElementId>,
    ) -> FormulaResult<()> {
        match &mut self.get_mut(index)?.kind {
            ElementKind::Index {
                upper_left,
                upper_right,
                lower_left,
                lower_right,
                ..
            } => {
                match corner {
                    IndexCorner::UpperLeft => *upper_left = value,
                    IndexCorner::UpperRight => *upper_right = value,
                    IndexCorner::LowerLeft => *lower_left = value,
                    IndexCorner::LowerRight => *lower_right = value,
                }
                Ok(())
            }
            _ => Err(FormulaError::NotAnIndex(index)),
        }
    }

    /// Replace the main child of an element with `seq`, returning the
    /// previous main child when one was displaced. A no-op for leaves.
    pub fn set_main_child(
        &mut self,
        id: ElementId,
        seq: ElementId,
    ) -> FormulaResult<Option<ElementId>> {
        self.get(seq)?;
        if id == seq {
            return Ok(None);
        }
        match &mut self.get_mut(id)?.kind {
            ElementKind::Sequence { children } => {
                if children.is_empty() {
                    children.push(seq);
                    self.get_mut(seq)?.parent = Some(id);
                    self.notify_changed();
                    Ok(None)
                } else {
                    let old = children[0];
                    if old == seq {
                        return Ok(None);
                    }
                    children[0] = seq;
                    self.get_mut(seq)?.parent = Some(id);
                    self.notify_changed();
                    Ok(Some(old))
                }
            }
            ElementKind::Index { content, .. } => {
                let old = *content;
                if old == seq {
                    return Ok(None);
                }
                *content = seq;
                self.get_mut(seq)?.parent = Some(id);
                self.notify_changed();
                Ok(Some(old))
            }
            ElementKind::Glyph { .. } => Ok(None),
        }
    }

    /// The sequence that holds (or will hold) this element's content: a
    /// sequence is its own; any other element gets a fresh empty sequence
    /// parented to it, ready to become its main child.
    pub fn make_sequence(&mut self, id: ElementId) -> FormulaResult<ElementId> {
        if self.get(id)?.is_sequence() {
            return Ok(id);
        }
        let seq = self.new_sequence();
        self.get_mut(seq)?.parent = Some(id);
        Ok(seq)
    }

    /// Remove an element and its whole subtree from storage. The element
    /// must already be unlinked from any container.
    pub fn dispose(&mut self, id: ElementId) -> FormulaResult<()> {
        if id == self.root {
            return Err(FormulaError::CannotRemoveRoot);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.remove(&current) {
                stack.extend(element.kind.child_ids());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Forward a change notification to the host sink
    pub fn notify_changed(&mut self) {
        self.sink.changed();
    }

    /// Forward a pre-detach removal notification to the host sink.
    /// The element must still be in the tree when this is called.
    pub fn notify_removed(&mut self, id: ElementId) {
        self.sink.element_removed(id);
    }

    // =========================================================================
    // Geometry queries
    // =========================================================================

    /// Absolute position: this element's offset plus every ancestor's
    pub fn global_position(&self, id: ElementId) -> Point {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut current = Some(id);
        while let Some(c) = current {
            if let Some(element) = self.elements.get(&c) {
                x += element.position.x;
                y += element.position.y;
                current = element.parent;
            } else {
                break;
            }
        }
        Point::new(x, y)
    }

    /// Absolute position of the insertion point after `slot` children of a
    /// sequence. An empty sequence offsets the caret slightly into its
    /// placeholder box.
    pub fn global_cursor_pos(&self, seq: ElementId, slot: usize) -> Point {
        let mut point = self.global_position(seq);
        let children = self.children(seq);
        let dx = if let Some(&child) = children.get(slot) {
            self.elements
                .get(&child)
                .map(|c| c.position.x)
                .unwrap_or(0.0)
        } else if !children.is_empty() {
            self.elements
                .get(&seq)
                .map(|s| s.size.width)
                .unwrap_or(0.0)
        } else {
            2.0
        };
        point.x += dx;
        point
    }

    // =========================================================================
    // Invariant checking
    // =========================================================================

    /// Verify parent/ownership agreement over the whole tree: every child
    /// link has a matching parent link, every non-root element is owned by
    /// exactly one container slot, and the root has no parent.
    pub fn validate(&self) -> FormulaResult<()> {
        let root = self.get(self.root)?;
        if root.parent.is_some() {
            return Err(FormulaError::OwnershipMismatch(self.root));
        }
        if !root.is_sequence() {
            return Err(FormulaError::NotASequence(self.root));
        }

        let mut owner_count: HashMap<ElementId, usize> = HashMap::new();
        for (&id, element) in &self.elements {
            for child in element.kind.child_ids() {
                let child_element = self.get(child)?;
                if child_element.parent != Some(id) {
                    return Err(FormulaError::OwnershipMismatch(child));
                }
                *owner_count.entry(child).or_insert(0) += 1;
            }
        }
        for (&id, element) in &self.elements {
            let owned = owner_count.get(&id).copied().unwrap_or(0);
            match (id == self.root, element.parent) {
                (true, _) => {}
                (false, Some(_)) if owned == 1 => {}
                (false, _) => return Err(FormulaError::OwnershipMismatch(id)),
            }
        }
        Ok(())
    }
}
