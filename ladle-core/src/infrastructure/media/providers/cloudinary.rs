use std::{fmt, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use ladle_model::{MediaUpload, UploadedMedia};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use crate::error::{RecipeError, Result};
use crate::infrastructure::media::MediaUploader;

pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Message surfaced to callers for every upload failure. Provider detail only
/// goes to the log.
const UPLOAD_FAILED: &str = "media upload failed";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Cloudinary credentials are not configured")]
    MissingCredentials,

    #[error("Empty upload")]
    EmptyFile,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CloudinarySettings {
    pub api_base: String,
    pub credentials: Option<CloudinaryCredentials>,
    pub timeout: Duration,
}

impl Default for CloudinarySettings {
    fn default() -> Self {
        Self {
            api_base: CLOUDINARY_API_BASE.to_string(),
            credentials: None,
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

impl CloudinarySettings {
    pub fn with_credentials(mut self, credentials: CloudinaryCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Signed image uploads against the Cloudinary REST API.
pub struct CloudinaryUploader {
    http: reqwest::Client,
    settings: CloudinarySettings,
}

impl fmt::Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryUploader")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(settings: CloudinarySettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                RecipeError::Upstream(format!(
                    "Failed to build media HTTP client: {e}"
                ))
            })?;

        if settings.credentials.is_none() {
            debug!("Cloudinary uploader created without credentials");
        }

        Ok(Self { http, settings })
    }

    pub fn has_credentials(&self) -> bool {
        self.settings.credentials.is_some()
    }

    fn upload_url(&self, cloud_name: &str) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.settings.api_base.trim_end_matches('/'),
            cloud_name
        )
    }

    async fn try_upload(
        &self,
        file: MediaUpload,
    ) -> std::result::Result<UploadedMedia, ProviderError> {
        let credentials = self
            .settings
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials)?;
        if file.is_empty() {
            return Err(ProviderError::EmptyFile);
        }

        let timestamp = Utc::now().timestamp();
        let signature = sign(timestamp, &credentials.api_secret);

        let file_name = file.file_name.unwrap_or_else(|| "upload".to_string());
        let mut part = Part::bytes(file.bytes).file_name(file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", credentials.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(self.upload_url(&credentials.cloud_name))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<UploadResponse>().await?;
            return body
                .secure_url
                .filter(|url| !url.is_empty())
                .map(|url| UploadedMedia { url })
                .ok_or_else(|| {
                    ProviderError::ParseError(
                        "response has no secure_url".to_string(),
                    )
                });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| {
                format!("Cloudinary upload failed with status {status}")
            });

        match status.as_u16() {
            401 => Err(ProviderError::InvalidApiKey),
            420 | 429 => Err(ProviderError::RateLimited),
            code => Err(ProviderError::ApiError {
                status: code,
                message,
            }),
        }
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: MediaUpload) -> Result<UploadedMedia> {
        let size = file.len();
        match self.try_upload(file).await {
            Ok(uploaded) => {
                info!(bytes = size, url = %uploaded.url, "media uploaded");
                Ok(uploaded)
            }
            Err(err) => {
                error!(bytes = size, error = %err, "media upload failed");
                Err(RecipeError::Upstream(UPLOAD_FAILED.to_string()))
            }
        }
    }
}

/// Hex SHA-256 over the signed parameters followed by the API secret.
pub fn sign(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}"));
    hasher.update(api_secret);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn credentials() -> CloudinaryCredentials {
        CloudinaryCredentials {
            cloud_name: "demo".into(),
            api_key: "key-123".into(),
            api_secret: "shh".into(),
        }
    }

    fn uploader(api_base: &str) -> CloudinaryUploader {
        CloudinaryUploader::new(
            CloudinarySettings::default()
                .with_api_base(api_base)
                .with_credentials(credentials()),
        )
        .unwrap()
    }

    fn image() -> MediaUpload {
        MediaUpload::new(vec![0xff, 0xd8, 0xff, 0xe0])
            .with_file_name("photo.jpg")
            .with_content_type("image/jpeg")
    }

    #[test]
    fn signature_matches_known_digest() {
        assert_eq!(
            sign(1_315_060_510, "abcd"),
            "5652e549a70bdc03f73a633a23b7d3f3b067d72fff26dd15b25997f46fdf6439"
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("demo"));
        assert!(!rendered.contains("key-123"));
        assert!(!rendered.contains("shh"));
    }

    #[tokio::test]
    async fn returns_secure_url_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="api_key"\s+key-123"#.to_string()),
                Matcher::Regex(r#"name="signature_algorithm"\s+sha256"#.to_string()),
                Matcher::Regex(r#"name="file"; filename="photo.jpg""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"secure_url":"https://res.cloudinary.com/demo/image/upload/v1/photo.jpg"}"#,
            )
            .create_async()
            .await;

        let uploaded = uploader(&server.url()).upload(image()).await.unwrap();

        assert_eq!(
            uploaded.url,
            "https://res.cloudinary.com/demo/image/upload/v1/photo.jpg"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn provider_errors_collapse_without_detail() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Invalid image file"}}"#)
            .create_async()
            .await;

        let err = uploader(&server.url()).upload(image()).await.unwrap_err();

        match err {
            RecipeError::Upstream(message) => {
                assert_eq!(message, UPLOAD_FAILED);
                assert!(!message.contains("Invalid image file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_without_secure_url_is_a_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1_1/demo/image/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"public_id":"photo"}"#)
            .create_async()
            .await;

        let uploader = uploader(&server.url());
        assert!(matches!(
            uploader.try_upload(image()).await,
            Err(ProviderError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_a_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let uploader = CloudinaryUploader::new(
            CloudinarySettings::default().with_api_base(server.url()),
        )
        .unwrap();
        assert!(!uploader.has_credentials());

        let err = uploader.upload(image()).await.unwrap_err();
        assert!(matches!(err, RecipeError::Upstream(_)));
        mock.assert_async().await;
    }
}
