//! Error types for the formula editor crate

use formula_model::FormulaError;
use thiserror::Error;

/// Errors that can occur during editing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// A structural operation failed in the underlying tree
    #[error(transparent)]
    Model(#[from] FormulaError),

    /// An operation on the element before the cursor was attempted at the
    /// first insertion point
    #[error("no element before the cursor")]
    NothingBeforeCursor,
}

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;
