//! Catalog maintenance endpoints (books and movies)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        item::{CatalogItem, CreateItem, UpdateItem},
        user::ADMIN_ONLY,
    },
};

use super::{today, AuthenticatedUser};

/// Add a book or movie
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item added", body = CatalogItem),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<CatalogItem>)> {
    claims.require_any(ADMIN_ONLY)?;
    request.validate()?;

    let created = state.services.catalog.create_item(request, today()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an item by serial number
#[utoipa::path(
    put,
    path = "/items/{serial}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("serial" = String, Path, description = "Serial number, e.g. BK001")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = CatalogItem),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(serial): Path<String>,
    Json(request): Json<UpdateItem>,
) -> AppResult<Json<CatalogItem>> {
    claims.require_any(ADMIN_ONLY)?;
    Ok(Json(state.services.catalog.update_item(&serial, request).await?))
}
