//! Core data model definitions shared across Ladle crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod recipe;
pub mod responses;
pub mod upload;

pub use error::{ModelError, Result as ModelResult};
pub use ids::RecipeID;
pub use recipe::{NewRecipe, Recipe, RecipeUpdate};
pub use responses::{FileUrlResponse, MessageResponse, RecipeCreatedResponse};
pub use upload::{MediaUpload, UploadedMedia};
