use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use ladle_core::api::routes::{ROOT, recipes, upload};

use crate::{
    handlers::{
        recipes::{
            create_recipe_handler, delete_recipe_handler, get_recipe_handler,
            list_recipes_handler, update_recipe_handler,
        },
        root::root_handler,
        upload::{UPLOAD_BODY_LIMIT, upload_file_handler},
    },
    infra::app_state::AppState,
};

/// Create the API router: recipe CRUD, uploads and the greeting.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(ROOT, get(root_handler))
        .merge(create_recipe_routes())
        .merge(create_upload_routes())
}

fn create_recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            recipes::COLLECTION,
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            recipes::COLLECTION_BARE,
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            recipes::ITEM,
            get(get_recipe_handler)
                .put(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
}

fn create_upload_routes() -> Router<AppState> {
    Router::new()
        .route(upload::FILE, post(upload_file_handler))
        .route(upload::FILE_BARE, post(upload_file_handler))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
