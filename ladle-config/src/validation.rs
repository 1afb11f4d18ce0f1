use axum::http::{Method, header::HeaderName};
use thiserror::Error;

use crate::models::{Config, CorsConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

/// Reject unusable settings and downgrade risky ones.
///
/// Credentials combined with a wildcard origin are switched off here: browsers
/// refuse that combination and the CORS layer panics when asked to build it.
pub fn apply_guard_rails(
    config: &mut Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_cors(&config.cors)?;

    if config.cors.is_wildcard_included() {
        if config.cors.allow_credentials {
            config.cors.allow_credentials = false;
            warnings.push_with_hint(
                "CORS credentials allowed alongside wildcard origin; credentials disabled",
                "List explicit origins in CORS_ALLOWED_ORIGINS to allow credentials",
            );
        }
        if !config.dev_mode {
            warnings.push_with_hint(
                "CORS allows any origin",
                "Set CORS_ALLOWED_ORIGINS to the frontend origins in production",
            );
        }
    }

    if !config.cloudinary.is_configured() {
        warnings.push_with_hint(
            format!(
                "Cloudinary is not fully configured (missing {}); uploads will fail",
                config.cloudinary.missing_keys().join(", ")
            ),
            "Set CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET",
        );
    }

    if config.database.primary_url.is_none() {
        warnings.push_with_hint(
            "No database URL configured",
            "Set DATABASE_URL or DATABASE_HOST/DATABASE_USER/DATABASE_NAME",
        );
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_origins.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGINS must include at least one origin"
                .into(),
        });
    }

    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in cors.allowed_methods.iter().filter(|m| m.as_str() != "*") {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"
                ),
            }
        })?;
    }

    if cors.allowed_headers.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_HEADERS must include at least one header name"
                    .into(),
        });
    }

    for header in cors.allowed_headers.iter().filter(|h| h.as_str() != "*") {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{header}` in CORS_ALLOWED_HEADERS"
                ),
            }
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CloudinaryConfig, ConfigMetadata, DatabaseConfig, ServerConfig,
    };
    use std::time::Duration;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8000,
            },
            database: DatabaseConfig {
                primary_url: Some("postgresql://localhost/recipes".into()),
                max_connections: None,
            },
            cloudinary: CloudinaryConfig {
                cloud_name: Some("demo".into()),
                api_key: Some("key".into()),
                api_secret: Some("secret".into()),
                api_base: "https://api.cloudinary.com".into(),
                upload_timeout: Duration::from_secs(30),
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".into()],
                allowed_methods: vec!["GET".into(), "POST".into()],
                allowed_headers: vec!["Content-Type".into()],
                allow_credentials: true,
            },
            dev_mode: false,
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn complete_config_passes_cleanly() {
        let mut config = config();
        let warnings = apply_guard_rails(&mut config).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(config.cors.allow_credentials);
    }

    #[test]
    fn wildcard_origin_disables_credentials() {
        let mut config = config();
        config.cors.allowed_origins = vec!["*".into()];

        let warnings = apply_guard_rails(&mut config).unwrap();

        assert!(!config.cors.allow_credentials);
        assert!(
            warnings
                .iter()
                .any(|w| w.message.contains("credentials disabled"))
        );
    }

    #[test]
    fn missing_cloudinary_keys_are_named() {
        let mut config = config();
        config.cloudinary.api_secret = None;

        let warnings = apply_guard_rails(&mut config).unwrap();

        assert_eq!(warnings.iter().count(), 1);
        assert!(warnings.items[0].message.contains("CLOUDINARY_API_SECRET"));
        assert!(!warnings.items[0].message.contains("CLOUDINARY_API_KEY"));
    }

    #[test]
    fn invalid_method_is_rejected() {
        let mut config = config();
        config.cors.allowed_methods = vec!["GET".into(), "BAD METHOD".into()];
        assert!(matches!(
            apply_guard_rails(&mut config),
            Err(ConfigGuardRailError::InvalidCorsConfig { .. })
        ));
    }

    #[test]
    fn wildcard_methods_and_headers_are_accepted() {
        let mut config = config();
        config.cors.allowed_methods = vec!["*".into()];
        config.cors.allowed_headers = vec!["*".into()];
        assert!(apply_guard_rails(&mut config).is_ok());
    }
}
