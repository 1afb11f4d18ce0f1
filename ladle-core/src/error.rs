use ladle_model::{ModelError, RecipeID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    /// The external id string does not parse. Never reaches the store.
    #[error("Invalid recipe identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Well-formed id, no matching document.
    #[error("Recipe not found: {0}")]
    NotFound(RecipeID),

    #[error("Invalid recipe: {0}")]
    Validation(String),

    /// The store or the media provider failed.
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl RecipeError {
    /// True for both flavours of "there is no such recipe".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecipeError::NotFound(_) | RecipeError::InvalidIdentifier(_)
        )
    }
}

impl From<ModelError> for RecipeError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidIdentifier(raw) => {
                RecipeError::InvalidIdentifier(raw)
            }
            ModelError::Validation(msg) => RecipeError::Validation(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
