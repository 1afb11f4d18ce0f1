//! Recipe use cases exposed to the HTTP layer.

pub mod repository;

pub use repository::RecipeRepository;
