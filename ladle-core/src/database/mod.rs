//! Persistence layer: the [`ports::recipes::RecipeStore`] port and the
//! adapters implementing it.

pub mod infrastructure;
pub mod ports;

#[cfg(feature = "database")]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;
