use axum::Json;
use ladle_model::MessageResponse;

/// GET / - service greeting
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Recipe Manager API"))
}
