use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::MessageBody;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateItemInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full replacement body; an omitted field keeps its stored value.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateItemInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn body_rejected(rejection: JsonRejection) -> JsonApiError {
    JsonApiError::validation(rejection.body_text())
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[utoipa::path(
    get, path = "/items", tag = "items",
    responses(
        (status = 200, description = "All items, newest first", body = [crate::openapi::ItemDoc]),
        (status = 500, description = "Failed to get items", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::item::Model>>, JsonApiError> {
    match state.items.get_all().await {
        Ok(list) => { info!(count = list.len(), "list items"); Ok(Json(list)) }
        Err(e) => Err(JsonApiError::from_service("Failed to get items", &e)),
    }
}

#[utoipa::path(
    get, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to get item", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<models::item::Model>, JsonApiError> {
    state
        .items
        .get(&id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service("Failed to get item", &e))
}

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::CreateItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to create item", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<models::item::Model>), JsonApiError> {
    let Json(input) = payload.map_err(body_rejected)?;

    // presence is checked here; length limits are enforced by the record layer
    let (Some(name), Some(description)) = (present(&input.name), present(&input.description)) else {
        return Err(JsonApiError::validation("Name and description are required"));
    };

    let m = state
        .items
        .create(name, description)
        .await
        .map_err(|e| JsonApiError::from_service("Failed to create item", &e))?;
    Ok((StatusCode::CREATED, Json(m)))
}

#[utoipa::path(
    put, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    request_body = crate::openapi::UpdateItemInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to update item", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemInput>, JsonRejection>,
) -> Result<Json<models::item::Model>, JsonApiError> {
    let Json(input) = payload.map_err(body_rejected)?;
    state
        .items
        .update(&id, input.name.as_deref(), input.description.as_deref())
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service("Failed to update item", &e))
}

#[utoipa::path(
    delete, path = "/items/{id}", tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Failed to delete item", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<MessageBody>, JsonApiError> {
    state
        .items
        .delete(&id)
        .await
        .map_err(|e| JsonApiError::from_service("Failed to delete item", &e))?;
    Ok(Json(MessageBody { message: format!("Item {} deleted successfully", id) }))
}
