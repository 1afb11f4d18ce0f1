use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use ladle_model::{
    MessageResponse, NewRecipe, Recipe, RecipeCreatedResponse, RecipeUpdate,
};

use crate::{errors::AppResult, infra::app_state::AppState};

/// POST /api/recipes/ - store a new recipe and echo it back with its id
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> AppResult<Json<RecipeCreatedResponse>> {
    let Json(recipe) = payload?;
    let recipe = state.repository.create(recipe).await?;

    Ok(Json(RecipeCreatedResponse {
        message: "Recipe created".to_string(),
        recipe,
    }))
}

/// GET /api/recipes/ - every stored recipe
pub async fn list_recipes_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.repository.list_all().await?))
}

/// GET /api/recipes/{id}
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.repository.get_by_id(&id).await?))
}

/// PUT /api/recipes/{id} - partial update; absent fields are left alone
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeUpdate>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(patch) = payload?;
    state.repository.update_partial(&id, patch).await?;
    Ok(Json(MessageResponse::new("Recipe updated")))
}

/// DELETE /api/recipes/{id}
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.repository.delete(&id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted")))
}
