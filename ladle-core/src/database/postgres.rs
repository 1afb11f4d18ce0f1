use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::info;

use crate::database::infrastructure::postgres::PostgresRecipeStore;
use crate::database::ports::recipes::RecipeStore;
use crate::error::{RecipeError, Result};

/// Owns the process-wide connection pool and hands out the recipe store.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    recipes: PostgresRecipeStore,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("max_connections", &self.max_connections)
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

impl PostgresDatabase {
    /// Connect once at startup. A failure here is meant to abort the process;
    /// nothing retries.
    pub async fn new(
        connection_string: &str,
        max_connections: Option<u32>,
    ) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(connection_string)
            .map_err(|e| {
                RecipeError::Upstream(format!("Invalid database URL: {e}"))
            })?;

        let mut pool_options = PgPoolOptions::new();
        if let Some(max) = max_connections {
            pool_options = pool_options.max_connections(max.max(1));
        }
        let max_connections = pool_options.get_max_connections();

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                RecipeError::Upstream(format!(
                    "Database connection failed: {e}"
                ))
            })?;

        info!(max_connections, "PostgreSQL pool ready");

        Ok(Self::with_pool(pool, max_connections))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        // Use default values for test pools
        Self::with_pool(pool, 10)
    }

    fn with_pool(pool: PgPool, max_connections: u32) -> Self {
        let recipes = PostgresRecipeStore::new(pool.clone());
        Self {
            pool,
            max_connections,
            recipes,
        }
    }

    /// The recipe store as the port the domain layer consumes.
    pub fn recipe_store(&self) -> Arc<dyn RecipeStore> {
        Arc::new(self.recipes.clone())
    }

    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            RecipeError::Upstream(format!("Migration failed: {e}"))
        })?;

        Ok(())
    }
}
