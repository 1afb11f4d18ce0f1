//! Media upload port and provider adapters.

pub mod providers;

use async_trait::async_trait;
use ladle_model::{MediaUpload, UploadedMedia};

use crate::error::Result;

pub use providers::cloudinary::{
    CloudinaryCredentials, CloudinarySettings, CloudinaryUploader,
};

/// Pushes a client file to an external media host and returns its public URL.
///
/// Implementations log provider detail themselves and report failures as
/// [`crate::RecipeError::Upstream`] with a message that is safe to surface.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: MediaUpload) -> Result<UploadedMedia>;
}
