//! Configuration library for Ladle.
//!
//! Settings are composed from a `.env` file, an optional TOML file and the
//! process environment, in increasing order of precedence. Guard rails run
//! after composition and either reject the configuration or attach warnings
//! the server logs at startup.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    CloudinaryConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
