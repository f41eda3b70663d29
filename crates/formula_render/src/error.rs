//! Error types for the render crate

use formula_model::FormulaError;
use thiserror::Error;

/// Errors that can occur while painting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The tree handed to the paint pass was inconsistent
    #[error(transparent)]
    Model(#[from] FormulaError),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
