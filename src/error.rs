use crate::ast::Span;
use thiserror::Error;

/// Result type for tolr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the tolr engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("unresolved reference '{name}' at {span}")]
    UnresolvedReference { name: String, span: Span },

    #[error("import conflict: '{name}' collides with an existing import or in-scope declaration")]
    ImportConflict { name: String },

    #[error("structural precondition failed: {message}")]
    StructuralPrecondition { message: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid text edit: {message}")]
    InvalidEdit { message: String },
}

impl Error {
    /// Create an unresolved-reference error carrying the offending name and range
    pub fn unresolved(name: impl Into<String>, span: Span) -> Self {
        Self::UnresolvedReference { name: name.into(), span }
    }

    /// Create an import-conflict error
    pub fn import_conflict(name: impl Into<String>) -> Self {
        Self::ImportConflict { name: name.into() }
    }

    /// Create a structural-precondition error
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralPrecondition { message: message.into() }
    }

    /// Create an invalid-edit error
    pub fn invalid_edit(message: impl Into<String>) -> Self {
        Self::InvalidEdit { message: message.into() }
    }

    /// True when the error is the cancellation signal
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
