//! Membership maintenance endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        membership::{CreateMembership, ExtendMembership, Membership},
        user::{ADMIN_ONLY, ALL_ROLES},
    },
};

use super::{today, AuthenticatedUser};

/// List all memberships
#[utoipa::path(
    get,
    path = "/memberships",
    tag = "memberships",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All memberships", body = Vec<Membership>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_memberships(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Membership>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.memberships.list().await?))
}

/// Get membership by number
#[utoipa::path(
    get,
    path = "/memberships/{number}",
    tag = "memberships",
    security(("bearer_auth" = [])),
    params(
        ("number" = String, Path, description = "Membership number, e.g. MEM001")
    ),
    responses(
        (status = 200, description = "Membership", body = Membership),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn get_membership(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(number): Path<String>,
) -> AppResult<Json<Membership>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.memberships.get(&number).await?))
}

/// Add a membership
#[utoipa::path(
    post,
    path = "/memberships",
    tag = "memberships",
    security(("bearer_auth" = [])),
    request_body = CreateMembership,
    responses(
        (status = 201, description = "Membership added", body = Membership),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_membership(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateMembership>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    claims.require_any(ADMIN_ONLY)?;
    request.validate()?;

    let created = state.services.memberships.create(request, today()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Extend a membership from its current end date
#[utoipa::path(
    post,
    path = "/memberships/{number}/extend",
    tag = "memberships",
    security(("bearer_auth" = [])),
    params(
        ("number" = String, Path, description = "Membership number")
    ),
    request_body = ExtendMembership,
    responses(
        (status = 200, description = "Membership extended", body = Membership),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn extend_membership(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(number): Path<String>,
    Json(request): Json<ExtendMembership>,
) -> AppResult<Json<Membership>> {
    claims.require_any(ADMIN_ONLY)?;
    Ok(Json(
        state
            .services
            .memberships
            .extend(&number, request.duration)
            .await?,
    ))
}

/// Cancel a membership
#[utoipa::path(
    post,
    path = "/memberships/{number}/cancel",
    tag = "memberships",
    security(("bearer_auth" = [])),
    params(
        ("number" = String, Path, description = "Membership number")
    ),
    responses(
        (status = 200, description = "Membership cancelled", body = Membership),
        (status = 404, description = "Membership not found")
    )
)]
pub async fn cancel_membership(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(number): Path<String>,
) -> AppResult<Json<Membership>> {
    claims.require_any(ADMIN_ONLY)?;
    Ok(Json(state.services.memberships.cancel(&number).await?))
}
