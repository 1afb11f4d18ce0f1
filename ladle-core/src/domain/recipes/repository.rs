use std::{fmt, sync::Arc};

use ladle_model::{NewRecipe, Recipe, RecipeID, RecipeUpdate};
use tracing::{debug, info};

use crate::database::ports::recipes::RecipeStore;
use crate::error::{RecipeError, Result};

/// Recipe CRUD on top of a [`RecipeStore`].
///
/// Every operation that takes an id accepts the external string form and
/// parses it into a [`RecipeID`] before the store sees anything. Malformed
/// ids fail with [`RecipeError::InvalidIdentifier`]; well-formed ids without
/// a document fail with [`RecipeError::NotFound`]. Returned recipes carry the
/// id as a [`RecipeID`], which renders and serializes as its canonical
/// string.
#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
}

impl fmt::Debug for RecipeRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeRepository")
            .field("store", &std::any::type_name_of_val(self.store.as_ref()))
            .finish()
    }
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, recipe: NewRecipe) -> Result<Recipe> {
        recipe.validate()?;
        let created = self.store.insert(recipe).await?;
        info!(recipe_id = %created.id, "recipe created");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Recipe>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Recipe> {
        let id = Self::parse_id(id)?;
        self.store.find(id).await?.ok_or_else(|| {
            debug!(recipe_id = %id, "recipe not found");
            RecipeError::NotFound(id)
        })
    }

    /// Apply only the fields present in `patch`. An empty patch against an
    /// existing recipe succeeds without changing anything.
    pub async fn update_partial(
        &self,
        id: &str,
        patch: RecipeUpdate,
    ) -> Result<()> {
        let id = Self::parse_id(id)?;
        patch.validate()?;

        let matched = self.store.update(id, &patch).await?;
        if matched == 0 {
            debug!(recipe_id = %id, "update matched no recipe");
            return Err(RecipeError::NotFound(id));
        }

        info!(
            recipe_id = %id,
            fields = ?patch.changed_fields(),
            "recipe updated"
        );
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = Self::parse_id(id)?;

        let removed = self.store.delete(id).await?;
        if removed == 0 {
            debug!(recipe_id = %id, "delete matched no recipe");
            return Err(RecipeError::NotFound(id));
        }

        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    fn parse_id(raw: &str) -> Result<RecipeID> {
        RecipeID::parse(raw).map_err(|err| {
            debug!(raw_id = raw, "rejecting malformed recipe id");
            RecipeError::from(err)
        })
    }
}
