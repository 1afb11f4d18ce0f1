//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::recipes::PostgresRecipeStore;
