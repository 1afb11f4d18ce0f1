use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The external identifier string is not a structurally valid id.
    InvalidIdentifier(String),
    /// A payload passed shape checks but violates a model invariant.
    Validation(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidIdentifier(raw) => {
                write!(f, "invalid recipe identifier: {raw:?}")
            }
            ModelError::Validation(msg) => write!(f, "invalid recipe: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
