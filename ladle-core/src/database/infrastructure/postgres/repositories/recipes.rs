use async_trait::async_trait;
use ladle_model::{NewRecipe, Recipe, RecipeID, RecipeUpdate};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::recipes::RecipeStore;
use crate::error::{RecipeError, Result};

#[derive(Debug, Clone)]
pub struct PostgresRecipeStore {
    pool: PgPool,
}

impl PostgresRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Recipe> {
        let id: Uuid = row.try_get("id").map_err(|e| {
            RecipeError::Upstream(format!("Failed to read recipe id: {e}"))
        })?;
        let title: String = row.try_get("title").map_err(|e| {
            RecipeError::Upstream(format!("Failed to read recipe title: {e}"))
        })?;
        let ingredients: Vec<String> =
            row.try_get("ingredients").map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to read recipe ingredients: {e}"
                ))
            })?;
        let instructions: String = row.try_get("instructions").map_err(|e| {
            RecipeError::Upstream(format!(
                "Failed to read recipe instructions: {e}"
            ))
        })?;
        let image_url: Option<String> =
            row.try_get("image_url").map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to read recipe image_url: {e}"
                ))
            })?;

        Ok(Recipe {
            id: RecipeID(id),
            title,
            ingredients,
            instructions,
            image_url,
        })
    }

    async fn exists(&self, id: RecipeID) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS present FROM recipes WHERE id = $1")
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to probe recipe {id}: {e}"
                ))
            })?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl RecipeStore for PostgresRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe> {
        let row = sqlx::query(
            r#"
            INSERT INTO recipes (title, ingredients, instructions, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, ingredients, instructions, image_url
            "#,
        )
        .bind(recipe.title)
        .bind(recipe.ingredients)
        .bind(recipe.instructions)
        .bind(recipe.image_url)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            RecipeError::Upstream(format!("Failed to insert recipe: {e}"))
        })?;

        Self::map_row(&row)
    }

    async fn list(&self) -> Result<Vec<Recipe>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, ingredients, instructions, image_url
            FROM recipes
            ORDER BY seq
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            RecipeError::Upstream(format!("Failed to list recipes: {e}"))
        })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find(&self, id: RecipeID) -> Result<Option<Recipe>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, ingredients, instructions, image_url
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            RecipeError::Upstream(format!("Failed to load recipe {id}: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn update(&self, id: RecipeID, update: &RecipeUpdate) -> Result<u64> {
        // An UPDATE needs at least one assignment; an empty patch only has
        // to report whether the document is there.
        if update.is_empty() {
            return Ok(u64::from(self.exists(id).await?));
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE recipes SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(title) = &update.title {
                assignments.push("title = ");
                assignments.push_bind_unseparated(title.clone());
            }
            if let Some(ingredients) = &update.ingredients {
                assignments.push("ingredients = ");
                assignments.push_bind_unseparated(ingredients.clone());
            }
            if let Some(instructions) = &update.instructions {
                assignments.push("instructions = ");
                assignments.push_bind_unseparated(instructions.clone());
            }
            if let Some(image_url) = &update.image_url {
                assignments.push("image_url = ");
                assignments.push_bind_unseparated(image_url.clone());
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id.to_uuid());

        let result = builder
            .build()
            .execute(self.pool())
            .await
            .map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to update recipe {id}: {e}"
                ))
            })?;

        debug!(
            recipe_id = %id,
            fields = ?update.changed_fields(),
            matched = result.rows_affected(),
            "recipe update applied"
        );

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: RecipeID) -> Result<u64> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to delete recipe {id}: {e}"
                ))
            })?;

        Ok(result.rows_affected())
    }
}
