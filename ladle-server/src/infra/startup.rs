use std::sync::Arc;

use ladle_config::{CloudinaryConfig, ConfigWarnings};
use ladle_core::{
    MediaUploader,
    infrastructure::media::{
        CloudinaryCredentials, CloudinarySettings, CloudinaryUploader,
    },
};
use tracing::warn;

pub fn cloudinary_settings(config: &CloudinaryConfig) -> CloudinarySettings {
    let credentials = config.credentials().map(|(cloud_name, api_key, api_secret)| {
        CloudinaryCredentials {
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    });

    CloudinarySettings {
        api_base: config.api_base.clone(),
        credentials,
        timeout: config.upload_timeout,
    }
}

/// The uploader is built even without credentials; uploads then fail and
/// the reason is logged per request.
pub fn build_uploader(
    config: &CloudinaryConfig,
) -> ladle_core::Result<Arc<dyn MediaUploader>> {
    let uploader = CloudinaryUploader::new(cloudinary_settings(config))?;
    Ok(Arc::new(uploader))
}

pub fn log_config_warnings(warnings: &ConfigWarnings) {
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn cloudinary(secret: Option<&str>) -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: Some("demo".into()),
            api_key: Some("key".into()),
            api_secret: secret.map(String::from),
            api_base: "http://127.0.0.1:9".into(),
            upload_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn complete_credentials_are_carried_over() {
        let settings = cloudinary_settings(&cloudinary(Some("secret")));
        let credentials = settings.credentials.unwrap();
        assert_eq!(credentials.cloud_name, "demo");
        assert_eq!(credentials.api_secret, "secret");
        assert_eq!(settings.api_base, "http://127.0.0.1:9");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn partial_credentials_are_dropped() {
        let settings = cloudinary_settings(&cloudinary(None));
        assert!(settings.credentials.is_none());
        assert!(build_uploader(&cloudinary(None)).is_ok());
    }
}
