//! The editing session: the host-facing surface of the editor
//!
//! A [`FormulaSession`] owns one formula tree and one cursor, routes key
//! and mouse events to them, and tracks a dirty flag through the tree's
//! notification sink. Layout is lazy: the host calls `ensure_layout`
//! before painting, and the tree is only relaid out when something
//! changed since the last pass.

use crate::commands;
use crate::cursor::Cursor;
use crate::edit;
use crate::error::EditResult;
use crate::navigate;
use formula_model::{
    compute_layout, element_at, DocumentSink, ElementId, FormulaTree, Point, StyleContext,
};
use std::cell::Cell;
use std::rc::Rc;

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
}

/// Modifier state accompanying a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

/// Sink that records change notifications in a shared dirty flag
struct DirtyFlag(Rc<Cell<bool>>);

impl DocumentSink for DirtyFlag {
    fn changed(&mut self) {
        self.0.set(true);
    }

    fn element_removed(&mut self, _id: ElementId) {
        // The session relocates its own cursor explicitly; nothing else
        // holds element references here.
    }
}

/// One formula being edited: tree, cursor, style, and dirty tracking
pub struct FormulaSession {
    tree: FormulaTree,
    cursor: Cursor,
    dirty: Rc<Cell<bool>>,
    style: StyleContext,
}

impl Default for FormulaSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaSession {
    /// An empty formula with the default style
    pub fn new() -> Self {
        Self::with_style(StyleContext::default())
    }

    pub fn with_style(style: StyleContext) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let tree = FormulaTree::with_sink(Box::new(DirtyFlag(dirty.clone())));
        let cursor = Cursor::new(tree.root());
        Self {
            tree,
            cursor,
            dirty,
            style,
        }
    }

    pub fn tree(&self) -> &FormulaTree {
        &self.tree
    }

    /// Direct tree access, e.g. for a host seeding initial content.
    /// Edits made through this keep the dirty flag honest via the sink.
    pub fn tree_mut(&mut self) -> &mut FormulaTree {
        &mut self.tree
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn style(&self) -> &StyleContext {
        &self.style
    }

    /// Whether an edit happened since the last layout pass
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Relayout the tree if anything changed since the last pass
    pub fn ensure_layout(&mut self) {
        if self.dirty.get() {
            compute_layout(&mut self.tree, &self.style);
            self.dirty.set(false);
        }
    }

    // =========================================================================
    // Key events
    // =========================================================================

    /// Route one key event to the cursor
    pub fn handle_key(&mut self, key: KeyInput, modifiers: Modifiers) -> EditResult<()> {
        self.cursor.set_mouse_mark(false);
        match key {
            KeyInput::Char(c) => self.handle_char(c)?,
            KeyInput::Backspace => edit::remove_child_before(&mut self.tree, &mut self.cursor)?,
            KeyInput::Delete => edit::remove_child_at(&mut self.tree, &mut self.cursor)?,
            KeyInput::Left | KeyInput::Right | KeyInput::Up | KeyInput::Down | KeyInput::Home
            | KeyInput::End => {
                self.cursor.set_selecting(modifiers.shift);
                let owner = self.cursor.owner();
                match key {
                    KeyInput::Left => {
                        if modifiers.ctrl {
                            navigate::move_home(&self.tree, &mut self.cursor, owner);
                        } else {
                            navigate::move_left(&self.tree, &mut self.cursor, owner, owner);
                        }
                    }
                    KeyInput::Right => {
                        if modifiers.ctrl {
                            navigate::move_end(&self.tree, &mut self.cursor, owner);
                        } else {
                            navigate::move_right(&self.tree, &mut self.cursor, owner, owner);
                        }
                    }
                    KeyInput::Up => navigate::move_up(&self.tree, &mut self.cursor, owner, owner),
                    KeyInput::Down => {
                        navigate::move_down(&self.tree, &mut self.cursor, owner, owner)
                    }
                    KeyInput::Home => {
                        let root = self.tree.root();
                        navigate::move_home(&self.tree, &mut self.cursor, root);
                    }
                    KeyInput::End => {
                        let root = self.tree.root();
                        navigate::move_end(&self.tree, &mut self.cursor, root);
                    }
                    _ => unreachable!("navigation keys only"),
                }
            }
        }
        tracing::debug!(
            ?key,
            position = self.cursor.position(),
            selecting = self.cursor.is_selecting(),
            "handled key"
        );
        Ok(())
    }

    fn handle_char(&mut self, c: char) -> EditResult<()> {
        match c {
            // Reserved for bracket/fraction/root structures
            '[' | '(' | '|' | '/' | '@' => {
                tracing::debug!(key = %c, "structure key not implemented");
            }
            '^' => {
                commands::add_upper_right_index(&mut self.tree, &mut self.cursor)?;
            }
            '_' => {
                commands::add_lower_right_index(&mut self.tree, &mut self.cursor)?;
            }
            c if c.is_whitespace() || c.is_control() => {}
            c => {
                commands::insert_text(&mut self.tree, &mut self.cursor, c.encode_utf8(&mut [0; 4]))?;
            }
        }
        Ok(())
    }

    /// Convenience for typing a whole string through the key path
    pub fn type_str(&mut self, text: &str) -> EditResult<()> {
        for c in text.chars() {
            self.handle_key(KeyInput::Char(c), Modifiers::NONE)?;
        }
        Ok(())
    }

    // =========================================================================
    // Mouse events
    // =========================================================================

    /// Place the cursor at the element under `point` and arm a drag anchor
    pub fn handle_mouse_press(&mut self, point: Point) {
        self.ensure_layout();
        let root = self.tree.root();
        let Some(hit) = element_at(&self.tree, root, point, Point::origin()) else {
            return;
        };
        let Some(parent) = self.tree.parent(hit) else {
            return;
        };
        navigate::move_left(&self.tree, &mut self.cursor, hit, parent);
        self.cursor.set_selecting(false);
        self.cursor.set_mouse_mark(true);
        let anchor = self.cursor.position();
        self.cursor.set_mark(Some(anchor));
        tracing::debug!(anchor, "mouse press");
    }

    /// Extend the drag selection toward the element under `point`
    pub fn handle_mouse_move(&mut self, point: Point) {
        self.ensure_layout();
        self.cursor.set_selecting(true);
        let root = self.tree.root();
        let Some(hit) = element_at(&self.tree, root, point, Point::origin()) else {
            return;
        };
        let Some(parent) = self.tree.parent(hit) else {
            return;
        };
        navigate::move_left(&self.tree, &mut self.cursor, parent, hit);
    }

    /// Release the drag anchor; the selection (if any) stays
    pub fn handle_mouse_release(&mut self) {
        self.cursor.set_mouse_mark(false);
    }
}
