//! # Ladle Core
//!
//! Core library for the Ladle recipe service: the recipe repository with its
//! identifier mapping and not-found semantics, the store port with Postgres
//! and in-memory adapters, and the media upload port with a Cloudinary
//! adapter.
//!
//! ## Feature Flags
//!
//! - `database`: Enables the PostgreSQL adapter and the migrator (SQLx)
//!
//! ## Architecture
//!
//! - [`domain::recipes`]: the [`RecipeRepository`] service handlers call
//! - [`database::ports`]: the [`RecipeStore`] trait persistence adapters implement
//! - [`database::infrastructure`]: Postgres and in-memory store adapters
//! - [`infrastructure::media`]: the [`MediaUploader`] trait and providers
//! - [`api::routes`]: HTTP paths shared by the server and its tests
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ladle_core::{
//!     database::infrastructure::memory::InMemoryRecipeStore,
//!     domain::recipes::RecipeRepository,
//! };
//! use ladle_model::NewRecipe;
//!
//! async fn create_and_fetch() -> ladle_core::error::Result<()> {
//!     let repository = RecipeRepository::new(Arc::new(InMemoryRecipeStore::new()));
//!     let created = repository
//!         .create(NewRecipe {
//!             title: "Pasta".to_string(),
//!             ingredients: vec!["pasta".to_string(), "sauce".to_string()],
//!             instructions: "Boil then mix".to_string(),
//!             image_url: None,
//!         })
//!         .await?;
//!
//!     let fetched = repository.get_by_id(&created.id.to_string()).await?;
//!     assert_eq!(fetched, created);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// HTTP route definitions shared across Ladle crates
pub mod api;

/// Persistence port and adapters
pub mod database;

/// Recipe use cases
pub mod domain;

/// Error types
pub mod error;

/// External service adapters
pub mod infrastructure;

pub use domain::recipes::RecipeRepository;
pub use database::ports::recipes::RecipeStore;
pub use error::{RecipeError, Result};
pub use infrastructure::media::MediaUploader;
pub use ladle_model as model;

#[cfg(feature = "database")]
pub use database::PostgresDatabase;

/// Embedded schema migrations for the Postgres store.
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
