//! Process-local store used by tests and local experiments.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ladle_model::{NewRecipe, Recipe, RecipeID, RecipeUpdate};
use parking_lot::RwLock;

use crate::database::ports::recipes::RecipeStore;
use crate::error::Result;

/// Keeps recipes in insertion order behind a lock.
///
/// Every trait call bumps [`InMemoryRecipeStore::query_count`], which lets
/// tests assert that rejected input never reached the store.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
    queries: AtomicUsize,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing documents, keeping their ids.
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes.into_iter().collect()),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }

    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe> {
        self.record_query();
        let stored = recipe.into_recipe(RecipeID::new());
        self.recipes.write().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Recipe>> {
        self.record_query();
        Ok(self.recipes.read().clone())
    }

    async fn find(&self, id: RecipeID) -> Result<Option<Recipe>> {
        self.record_query();
        Ok(self
            .recipes
            .read()
            .iter()
            .find(|recipe| recipe.id == id)
            .cloned())
    }

    async fn update(&self, id: RecipeID, update: &RecipeUpdate) -> Result<u64> {
        self.record_query();
        let mut recipes = self.recipes.write();
        match recipes.iter_mut().find(|recipe| recipe.id == id) {
            Some(recipe) => {
                update.apply_to(recipe);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: RecipeID) -> Result<u64> {
        self.record_query();
        let mut recipes = self.recipes.write();
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id != id);
        Ok((before - recipes.len()) as u64)
    }
}
