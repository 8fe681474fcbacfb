//! Read-only reports

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        issue::IssueDetails,
        item::{CatalogItem, ItemKind},
        membership::Membership,
        request::IssueRequestDetails,
        user::ALL_ROLES,
    },
};

use super::{today, AuthenticatedUser};

/// Master list of books
#[utoipa::path(
    get,
    path = "/reports/books",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<CatalogItem>)
    )
)]
pub async fn books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CatalogItem>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.catalog.list_by_kind(ItemKind::Book).await?))
}

/// Master list of movies
#[utoipa::path(
    get,
    path = "/reports/movies",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All movies", body = Vec<CatalogItem>)
    )
)]
pub async fn movies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CatalogItem>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.catalog.list_by_kind(ItemKind::Movie).await?))
}

/// Master list of memberships
#[utoipa::path(
    get,
    path = "/reports/memberships",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All memberships", body = Vec<Membership>)
    )
)]
pub async fn memberships(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Membership>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.memberships.list().await?))
}

/// Issues not yet returned, overdue ones flagged
#[utoipa::path(
    get,
    path = "/reports/active-issues",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active and overdue issues", body = Vec<IssueDetails>)
    )
)]
pub async fn active_issues(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<IssueDetails>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.issues.active_issues(today()).await?))
}

/// Overdue returns with days overdue as of today
#[utoipa::path(
    get,
    path = "/reports/overdue",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue issues", body = Vec<IssueDetails>)
    )
)]
pub async fn overdue_returns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<IssueDetails>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.issues.overdue_issues(today()).await?))
}

#[utoipa::path(
    get,
    path = "/reports/requests",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Issue requests", body = Vec<IssueRequestDetails>)
    )
)]
pub async fn issue_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<IssueRequestDetails>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.requests.list().await?))
}
