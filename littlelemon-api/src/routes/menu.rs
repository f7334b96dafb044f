/// Menu item endpoints
///
/// Reads are open to anyone; writes require a bearer token (enforced by the
/// route group's policy guard).
///
/// # Endpoints
///
/// - `GET /menu/` - List menu items
/// - `POST /menu/` - Create menu item
/// - `GET /menu/:id/` - Fetch one item
/// - `PUT /menu/:id/` - Replace item
/// - `DELETE /menu/:id/` - Delete item

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use littlelemon_shared::{
    auth::middleware::AuthContext,
    models::menu_item::{MenuItem, NewMenuItem},
};
use tracing::info;

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Menu item {} not found", id))
}

/// List menu items
///
/// # Endpoint
///
/// ```text
/// GET /menu/
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "name": "Pizza", "price": 15, "description": "Cheesy" }
/// ]
/// ```
pub async fn list_menu_items(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.list().await?))
}

/// Create menu item
///
/// # Endpoint
///
/// ```text
/// POST /menu/
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "name": "Pasta", "price": 12, "description": "Creamy" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `422 Unprocessable Entity`: Missing or malformed fields
pub async fn create_menu_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<NewMenuItem>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = state.menu.create(req).await?;

    info!(menu_item_id = item.id, by = %auth.subject, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Fetch one menu item
///
/// # Errors
///
/// - `404 Not Found`: No item with this ID
pub async fn get_menu_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MenuItem>> {
    state
        .menu
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Replace a menu item
///
/// All mutable fields are replaced.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No item with this ID
/// - `422 Unprocessable Entity`: Missing or malformed fields
pub async fn update_menu_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<NewMenuItem>,
) -> ApiResult<Json<MenuItem>> {
    let item = state
        .menu
        .update(id, req)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(menu_item_id = id, by = %auth.subject, "Menu item updated");
    Ok(Json(item))
}

/// Delete a menu item
///
/// Deleting an already-deleted item reports `404`.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: No item with this ID
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !state.menu.delete(id).await? {
        return Err(not_found(id));
    }

    info!(menu_item_id = id, by = %auth.subject, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
