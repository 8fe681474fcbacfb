//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, UserInfo, ADMIN_ONLY},
};

use super::AuthenticatedUser;

/// List desk users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = Vec<UserInfo>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserInfo>>> {
    claims.require_admin()?;
    Ok(Json(state.services.users.list().await?))
}

/// Create a desk user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    claims.require_any(ADMIN_ONLY)?;
    request.validate()?;

    let created = state.services.users.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a desk user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserInfo),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUser>,
) -> AppResult<Json<UserInfo>> {
    claims.require_any(ADMIN_ONLY)?;
    request.validate()?;

    Ok(Json(state.services.users.update(&id, request).await?))
}
