//! Formula Editor - cursor, navigation, and structural editing
//!
//! This crate drives the element tree from `formula_model`:
//! - A cursor holding an insertion slot in one sequence, plus selection
//!   state anchored by a mark position
//! - Total directional navigation: glyphs bounce the cursor to their
//!   parent, sequences walk their slots, index elements route between
//!   their corners and content
//! - Structural edits that keep the cursor valid and collapse empty
//!   wrappers automatically
//! - An editing session translating key and mouse events into all of the
//!   above, with lazy relayout and dirty tracking

pub mod commands;
pub mod cursor;
pub mod edit;
pub mod error;
pub mod navigate;
pub mod session;

pub use commands::{add_index, add_lower_right_index, add_upper_right_index, insert_text};
pub use cursor::Cursor;
pub use edit::{
    insert_child, remove_child, remove_child_at, remove_child_before, replace_child,
    replace_current_selection, replace_element_by_main_child,
};
pub use error::{EditError, EditResult};
pub use navigate::{move_down, move_end, move_home, move_left, move_right, move_up};
pub use session::{FormulaSession, KeyInput, Modifiers};

#[cfg(test)]
mod tests {
    use super::*;
    use formula_model::{ElementKind, IndexCorner};

    #[test]
    fn test_full_editing_round_trip() {
        // Type a formula with a superscript, then delete the script again
        // and end with the plain text.
        let mut session = FormulaSession::new();
        session.type_str("y=e^x").unwrap();

        let tree = session.tree();
        let root = tree.root();
        assert_eq!(tree.child_count(root), 3); // y, =, e^x
        let idx = tree.children(root)[2];
        assert!(tree.get(idx).unwrap().is_index());

        // Delete the exponent glyph, then the now-empty corner
        session
            .handle_key(KeyInput::Backspace, Modifiers::NONE)
            .unwrap();
        session
            .handle_key(KeyInput::Backspace, Modifiers::NONE)
            .unwrap();

        let tree = session.tree();
        let root = tree.root();
        let texts: Vec<_> = tree
            .children(root)
            .iter()
            .map(|&c| match &tree.get(c).unwrap().kind {
                ElementKind::Glyph { text } => text.as_str(),
                _ => "?",
            })
            .collect();
        assert_eq!(texts, vec!["y", "=", "e"]);
        assert!(tree.validate().is_ok());
        assert!(session.cursor().validate(tree));
    }

    #[test]
    fn test_navigation_round_trip_over_flat_text() {
        let mut session = FormulaSession::new();
        session.type_str("abc").unwrap();

        // Walk to the start, then back to the end
        for _ in 0..3 {
            session.handle_key(KeyInput::Left, Modifiers::NONE).unwrap();
        }
        assert_eq!(session.cursor().position(), 0);
        for _ in 0..3 {
            session
                .handle_key(KeyInput::Right, Modifiers::NONE)
                .unwrap();
        }
        assert_eq!(session.cursor().position(), 3);
    }

    #[test]
    fn test_vertical_navigation_into_script() {
        let mut session = FormulaSession::new();
        session.type_str("x^2").unwrap();
        let tree = session.tree();
        let idx = tree.children(tree.root())[0];
        let content = tree.content_of(idx).unwrap();
        let ur = tree.corner(idx, IndexCorner::UpperRight).unwrap();
        let root = tree.root();

        // Leave the corner, land after the index, then step down into the
        // content and up into the corner again.
        session
            .handle_key(KeyInput::Right, Modifiers::NONE)
            .unwrap();
        assert_eq!(session.cursor().owner(), root);
        session.handle_key(KeyInput::Left, Modifiers::NONE).unwrap();
        assert_eq!(session.cursor().owner(), ur);
        session.handle_key(KeyInput::Down, Modifiers::NONE).unwrap();
        assert_eq!(session.cursor().owner(), content);
        session.handle_key(KeyInput::Up, Modifiers::NONE).unwrap();
        assert_eq!(session.cursor().owner(), ur);
    }
}
