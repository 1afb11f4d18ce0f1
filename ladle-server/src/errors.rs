use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use ladle_core::RecipeError;

pub type AppResult<T> = Result<T, AppError>;

pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
pub const DATABASE_FAILED: &str = "Database operation failed";
pub const UPLOAD_FAILED: &str = "File upload failed";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Generic upload failure. Provider detail never reaches the client.
    pub fn upload_failed(err: RecipeError) -> Self {
        error!(error = %err, "file upload failed");
        Self::internal(UPLOAD_FAILED)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<RecipeError> for AppError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::InvalidIdentifier(_) | RecipeError::NotFound(_) => {
                Self::not_found(RECIPE_NOT_FOUND)
            }
            RecipeError::Validation(msg) => Self::bad_request(msg),
            RecipeError::Upstream(_) => {
                error!(error = %err, "database operation failed");
                Self::internal(DATABASE_FAILED)
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}
