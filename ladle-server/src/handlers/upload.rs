use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
};
use ladle_model::{FileUrlResponse, MediaUpload};
use tracing::debug;

use crate::{
    errors::{AppError, AppResult},
    infra::app_state::AppState,
};

/// Multipart field that carries the file.
pub const FILE_FIELD: &str = "file";

/// Request body cap for uploads.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// POST /api/upload/ - push the `file` field to the media host
pub async fn upload_file_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<FileUrlResponse>> {
    let mut multipart = multipart
        .map_err(|rejection| AppError::new(rejection.status(), rejection.body_text()))?;

    let file = read_file_field(&mut multipart).await?.ok_or_else(|| {
        AppError::bad_request(format!("Missing `{FILE_FIELD}` field"))
    })?;
    debug!(?file, "received upload");

    let uploaded = state
        .uploader
        .upload(file)
        .await
        .map_err(AppError::upload_failed)?;

    Ok(Json(FileUrlResponse {
        file_url: uploaded.url,
    }))
}

async fn read_file_field(
    multipart: &mut Multipart,
) -> AppResult<Option<MediaUpload>> {
    while let Some(field) =
        multipart.next_field().await.map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let mut upload = MediaUpload::new(bytes.to_vec());
        if let Some(name) = file_name {
            upload = upload.with_file_name(name);
        }
        if let Some(content_type) = content_type {
            upload = upload.with_content_type(content_type);
        }
        return Ok(Some(upload));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), err.body_text())
}
