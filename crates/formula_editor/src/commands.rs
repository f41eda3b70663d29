//! User-intent commands: text insertion and index creation
//!
//! These translate "the user typed something" into structural edits. The
//! index commands reuse an index element already adjacent to the cursor
//! when there is one, so typing `x`, `^`, `2`, `_`, `i` builds one
//! element carrying both scripts instead of a chain of nested wrappers.

use crate::cursor::Cursor;
use crate::edit;
use crate::error::EditResult;
use crate::navigate;
use formula_model::{ElementId, FormulaTree, IndexCorner};
use unicode_segmentation::UnicodeSegmentation;

/// Insert text at the cursor, one glyph element per grapheme cluster.
/// Whitespace is skipped. Returns the number of glyphs inserted.
pub fn insert_text(tree: &mut FormulaTree, cursor: &mut Cursor, text: &str) -> EditResult<usize> {
    let mut inserted = 0;
    for grapheme in text.graphemes(true) {
        if grapheme.chars().all(char::is_whitespace) {
            continue;
        }
        let glyph = tree.new_glyph(grapheme);
        edit::insert_child(tree, cursor, glyph)?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Attach an index corner at the cursor and move the cursor into it.
///
/// If an index element already sits just before the cursor (or the cursor
/// is at the end of one's content), that element gains the corner;
/// otherwise the current selection or the preceding element is wrapped
/// into a fresh index first. Returns the corner sequence.
pub fn add_index(
    tree: &mut FormulaTree,
    cursor: &mut Cursor,
    corner: IndexCorner,
) -> EditResult<ElementId> {
    let index = match cursor.find_index_element(tree) {
        Some(existing) => existing,
        None => {
            let fresh = tree.new_index();
            edit::replace_current_selection(tree, cursor, fresh)?;
            fresh
        }
    };
    let slot = tree.require_corner(index, corner)?;
    navigate::move_right(tree, cursor, slot, index);
    Ok(slot)
}

/// Superscript after the cursor's element (the `^` key)
pub fn add_upper_right_index(tree: &mut FormulaTree, cursor: &mut Cursor) -> EditResult<ElementId> {
    add_index(tree, cursor, IndexCorner::UpperRight)
}

/// Subscript after the cursor's element (the `_` key)
pub fn add_lower_right_index(tree: &mut FormulaTree, cursor: &mut Cursor) -> EditResult<ElementId> {
    add_index(tree, cursor, IndexCorner::LowerRight)
}
