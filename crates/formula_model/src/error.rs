//! Error types for the formula model crate

use crate::element_id::ElementId;
use thiserror::Error;

/// Errors that can occur in formula tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// The id does not name a live element
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// A sequence operation was applied to a non-sequence element
    #[error("element {0} is not a sequence")]
    NotASequence(ElementId),

    /// An index operation was applied to a non-index element
    #[error("element {0} is not an index")]
    NotAnIndex(ElementId),

    /// The element is not owned by the named container
    #[error("element {child} is not a child of {parent}")]
    NotAChild { parent: ElementId, child: ElementId },

    /// A child slot index was outside the container's bounds
    #[error("child slot {slot} out of range ({len} children)")]
    SlotOutOfRange { slot: usize, len: usize },

    /// The formula root cannot be detached or disposed
    #[error("the formula root cannot be removed")]
    CannotRemoveRoot,

    /// A parent link disagrees with the owning container
    #[error("parent/ownership mismatch at element {0}")]
    OwnershipMismatch(ElementId),
}

/// Result type for formula tree operations
pub type FormulaResult<T> = Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormulaError::SlotOutOfRange { slot: 7, len: 3 };
        assert_eq!(err.to_string(), "child slot 7 out of range (3 children)");
    }
}
