use async_trait::async_trait;
use ladle_model::{NewRecipe, Recipe, RecipeID, RecipeUpdate};

use crate::error::Result;

/// The single recipe collection.
///
/// Implementations work with parsed [`RecipeID`]s only; string handling
/// belongs to [`crate::domain::recipes::RecipeRepository`]. Failures of the
/// backing store are reported as [`crate::error::RecipeError::Upstream`].
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a new document. The store assigns the id.
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe>;

    /// Every stored document, in whatever order the store yields them.
    async fn list(&self) -> Result<Vec<Recipe>>;

    async fn find(&self, id: RecipeID) -> Result<Option<Recipe>>;

    /// Apply only the fields present in `update`. Returns the number of
    /// documents matched (0 or 1), whether or not any value changed.
    async fn update(&self, id: RecipeID, update: &RecipeUpdate) -> Result<u64>;

    /// Returns the number of documents removed (0 or 1).
    async fn delete(&self, id: RecipeID) -> Result<u64>;
}
