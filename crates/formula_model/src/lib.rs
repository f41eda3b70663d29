//! Formula Model - the structural core of the formula editor
//!
//! This crate provides the in-memory model for mathematical expressions:
//! - An element tree of glyphs, baseline-aligned sequences, and index nodes
//!   (superscripts/subscripts in up to four corners)
//! - Stable element ids and parent back-references for structural edits
//! - A recursive layout pass computing sizes, positions, and midlines
//! - Hit-testing from a point down to the deepest element
//! - A host notification boundary for change/removal events

pub mod element;
pub mod element_id;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod tree;

pub use element::{Element, ElementKind, IndexCorner};
pub use element_id::ElementId;
pub use error::{FormulaError, FormulaResult};
pub use geometry::{Point, Rect, Size};
pub use layout::{compute_layout, element_at, layout_element, EMPTY_BOX_MIDLINE, EMPTY_BOX_SIZE};
pub use style::{FontMetrics, StyleContext};
pub use tree::{DocumentSink, FormulaTree, NullSink};
