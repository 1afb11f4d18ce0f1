//! # Ladle Server
//!
//! HTTP surface for the Ladle recipe service: recipe CRUD under
//! `/api/recipes`, image uploads under `/api/upload` and a greeting at `/`.
//! Handlers only translate between HTTP and [`ladle_core::RecipeRepository`]
//! or [`ladle_core::MediaUploader`]; everything else lives in `ladle-core`.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use infra::app_state::AppState;

/// The full application with tracing and CORS applied.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = infra::cors::build_cors_layer(&state.config().cors);

    routes::create_api_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}
