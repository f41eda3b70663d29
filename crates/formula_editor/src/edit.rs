//! Structural edit operations
//!
//! Every operation here works on a `(&mut FormulaTree, &mut Cursor)` pair:
//! the tree provides the raw structure primitives, and the cursor is kept
//! valid through every mutation. Before anything is detached, the tree's
//! sink is notified and the cursor relocates itself out of the doomed
//! subtree; only then does the detach (and disposal) happen.
//!
//! Containers that edit themselves empty collapse automatically: a
//! sequence whose last child was removed asks its parent to remove it,
//! and an index element that loses its last corner splices its content
//! back into the surrounding sequence.

use crate::cursor::Cursor;
use crate::error::{EditError, EditResult};
use crate::navigate;
use formula_model::{ElementId, FormulaError, FormulaTree};

/// Pre-detach notification: host sink first, then cursor relocation.
/// The tree must still contain `id`.
fn notify_removed(tree: &mut FormulaTree, cursor: &mut Cursor, id: ElementId) {
    tree.notify_removed(id);
    cursor.element_removed(tree, id);
}

/// Insert an element at the cursor; the cursor ends up just after it
pub fn insert_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    element: ElementId,
) -> EditResult<()> {
    let seq = cursor.owner();
    let position = cursor.position();
    tree.insert_child_at(seq, position, element)?;
    cursor.set(seq, position + 1);
    Ok(())
}

/// Replace the element immediately before the cursor, returning the
/// displaced element. The displaced element is not disposed of; callers
/// that moved it elsewhere already own it.
pub fn replace_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    element: ElementId,
) -> EditResult<ElementId> {
    let seq = cursor.owner();
    let position = cursor.position();
    if position == 0 {
        return Err(EditError::NothingBeforeCursor);
    }
    Ok(tree.replace_child_at(seq, position - 1, element)?)
}

/// Remove `child` from `container`, dispatching on the container kind.
/// Leaves own no children, so the call is a no-op for them.
pub fn remove_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    container: ElementId,
    child: ElementId,
) -> EditResult<()> {
    let (is_sequence, is_index) = {
        let element = tree.get(container)?;
        (element.is_sequence(), element.is_index())
    };
    if is_sequence {
        sequence_remove_child(tree, cursor, container, child)
    } else if is_index {
        index_remove_child(tree, cursor, container, child)
    } else {
        Ok(())
    }
}

fn sequence_remove_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    seq: ElementId,
    child: ElementId,
) -> EditResult<()> {
    let slot = tree
        .child_index(seq, child)
        .ok_or(FormulaError::NotAChild { parent: seq, child })?;
    notify_removed(tree, cursor, child);
    cursor.set(seq, slot);
    tree.detach_child_at(seq, slot)?;
    tree.dispose(child)?;
    if tree.child_count(seq) == 0 {
        if let Some(parent) = tree.parent(seq) {
            // The sequence itself is now an empty wrapper; collapse it
            return remove_child(tree, cursor, parent, seq);
        }
    }
    tree.notify_changed();
    Ok(())
}

fn index_remove_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    index: ElementId,
    child: ElementId,
) -> EditResult<()> {
    if tree.content_of(index) == Some(child) {
        // The content cannot be removed on its own; the whole index goes
        if let Some(parent) = tree.parent(index) {
            return remove_child(tree, cursor, parent, index);
        }
        return Ok(());
    }

    let corner = tree
        .corner_holding(index, child)
        .ok_or(FormulaError::NotAChild { parent: index, child })?;
    let content = tree
        .content_of(index)
        .ok_or(FormulaError::NotAnIndex(index))?;

    notify_removed(tree, cursor, child);
    // Re-home the cursor into the content, on the side the corner was on
    if corner.is_left() {
        navigate::move_right(tree, cursor, content, index);
    } else {
        navigate::move_left(tree, cursor, content, index);
    }
    tree.clear_corner(index, corner)?;
    tree.dispose(child)?;

    if !tree.has_any_corner(index) {
        if let Some(parent) = tree.parent(index) {
            // No corners left at all: decay back into plain content
            return replace_element_by_main_child(tree, cursor, parent, index);
        }
    }
    tree.notify_changed();
    Ok(())
}

/// Delete forward: the child at the cursor, or the whole selected range
pub fn remove_child_at(tree: &mut FormulaTree, cursor: &mut Cursor) -> EditResult<()> {
    let seq = cursor.owner();
    if let Some((from, to)) = cursor.selection_range() {
        return remove_range(tree, cursor, seq, from, to);
    }
    let position = cursor.position();
    let count = tree.child_count(seq);
    if position < count {
        let child = tree.children(seq)[position];
        notify_removed(tree, cursor, child);
        tree.detach_child_at(seq, position)?;
        tree.dispose(child)?;
        tree.notify_changed();
        Ok(())
    } else if count == 0 {
        if let Some(parent) = tree.parent(seq) {
            remove_child(tree, cursor, parent, seq)
        } else {
            Ok(())
        }
    } else {
        Ok(())
    }
}

/// Delete backward: the child before the cursor, or the selected range
pub fn remove_child_before(tree: &mut FormulaTree, cursor: &mut Cursor) -> EditResult<()> {
    let seq = cursor.owner();
    if let Some((from, to)) = cursor.selection_range() {
        return remove_range(tree, cursor, seq, from, to);
    }
    if cursor.position() > 0 {
        let position = cursor.position() - 1;
        let child = tree
            .children(seq)
            .get(position)
            .copied()
            .ok_or(FormulaError::SlotOutOfRange {
                slot: position,
                len: tree.child_count(seq),
            })?;
        notify_removed(tree, cursor, child);
        tree.detach_child_at(seq, position)?;
        tree.dispose(child)?;
        cursor.set(seq, position);
        tree.notify_changed();
        Ok(())
    } else if tree.child_count(seq) == 0 {
        if let Some(parent) = tree.parent(seq) {
            remove_child(tree, cursor, parent, seq)
        } else {
            Ok(())
        }
    } else {
        Ok(())
    }
}

/// Delete the half-open child range `[from, to)` of `seq`, clearing the
/// selection and leaving the cursor at the range start.
fn remove_range(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    seq: ElementId,
    from: usize,
    to: usize,
) -> EditResult<()> {
    let to = to.min(tree.child_count(seq));
    for _ in from..to {
        let Some(&child) = tree.children(seq).get(from) else {
            break;
        };
        notify_removed(tree, cursor, child);
        tree.detach_child_at(seq, from)?;
        tree.dispose(child)?;
    }
    cursor.set_mark(None);
    cursor.set(seq, from);
    tree.notify_changed();
    Ok(())
}

/// Wrap the current selection (or the element before the cursor) into
/// `element`, which becomes their new container: the absorbed children
/// move into `element`'s main-child sequence and `element` takes their
/// place. With the cursor at the first slot and no selection, `element`
/// is inserted fresh with an empty main child.
pub fn replace_current_selection(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    element: ElementId,
) -> EditResult<()> {
    let owner = cursor.owner();
    let seq = tree.make_sequence(element)?;

    if let Some((from, to)) = cursor.selection_range() {
        let to = to.min(tree.child_count(owner));
        for _ in from..to {
            let Some(&child) = tree.children(owner).get(from) else {
                break;
            };
            notify_removed(tree, cursor, child);
            tree.detach_child_at(owner, from)?;
            tree.add_child(seq, child)?;
        }
        tree.insert_child_at(owner, from, element)?;
        cursor.set_mark(None);
        cursor.set(owner, from + 1);
    } else if cursor.position() > 0 {
        let position = cursor.position();
        let before = tree
            .children(owner)
            .get(position - 1)
            .copied()
            .ok_or(FormulaError::SlotOutOfRange {
                slot: position - 1,
                len: tree.child_count(owner),
            })?;
        // Absorb the preceding element, then drop `element` into its slot
        tree.add_child(seq, before)?;
        tree.replace_child_at(owner, position - 1, element)?;
    } else {
        insert_child(tree, cursor, element)?;
    }

    if let Some(displaced) = tree.set_main_child(element, seq)? {
        tree.dispose(displaced)?;
    }
    Ok(())
}

/// The inverse of [`replace_current_selection`]: splice `element`'s main
/// child's children into `seq` at `element`'s slot and remove `element`.
/// The cursor ends up just after the spliced run.
pub fn replace_element_by_main_child(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    seq: ElementId,
    element: ElementId,
) -> EditResult<()> {
    if tree.parent(element) != Some(seq) {
        return Err(FormulaError::NotAChild {
            parent: seq,
            child: element,
        }
        .into());
    }
    let slot = tree
        .child_index(seq, element)
        .ok_or(FormulaError::NotAChild {
            parent: seq,
            child: element,
        })?;
    let inner = tree
        .main_child(element)
        .ok_or(FormulaError::NotASequence(element))?;

    notify_removed(tree, cursor, element);
    tree.detach_child_at(seq, slot)?;
    let mut insert_at = slot;
    while tree.child_count(inner) > 0 {
        let child = tree.detach_child_at(inner, 0)?;
        tree.insert_child_at(seq, insert_at, child)?;
        insert_at += 1;
    }
    cursor.set(seq, insert_at);
    tree.dispose(element)?;
    tree.notify_changed();
    Ok(())
}
