//! Desk transactions: availability, issue, return and fine payment

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        issue::{CompleteReturn, CreateIssue, IssueDetails, ReturnQuote, ReturnQuoteRequest},
        item::{AvailabilityQuery, CatalogItem},
        user::ALL_ROLES,
    },
};

use super::{today, AuthenticatedUser};

/// Titles with copies on the shelf matching name and/or author
#[utoipa::path(
    get,
    path = "/transactions/availability",
    tag = "transactions",
    security(("bearer_auth" = [])),
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available items", body = Vec<CatalogItem>),
        (status = 400, description = "Neither name nor author given", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<CatalogItem>>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.catalog.check_availability(&query).await?))
}

/// Issue a book to a member
#[utoipa::path(
    post,
    path = "/transactions/issues",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = CreateIssue,
    responses(
        (status = 201, description = "Book issued", body = IssueDetails),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 404, description = "Member or item not found"),
        (status = 422, description = "Member inactive or no copy available")
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateIssue>,
) -> AppResult<(StatusCode, Json<IssueDetails>)> {
    claims.require_any(ALL_ROLES)?;
    request.validate()?;

    let issued = state.services.issues.issue_item(request, today()).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// Look up the open issue of a copy and compute the fine for a return date
#[utoipa::path(
    post,
    path = "/transactions/returns/quote",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = ReturnQuoteRequest,
    responses(
        (status = 200, description = "Return quote", body = ReturnQuote),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 404, description = "No open issue for the copy")
    )
)]
pub async fn quote_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnQuoteRequest>,
) -> AppResult<Json<ReturnQuote>> {
    claims.require_any(ALL_ROLES)?;
    Ok(Json(state.services.issues.quote_return(request, today()).await?))
}

/// Complete a return, confirming fine payment when one is due
#[utoipa::path(
    post,
    path = "/transactions/returns",
    tag = "transactions",
    security(("bearer_auth" = [])),
    request_body = CompleteReturn,
    responses(
        (status = 200, description = "Return recorded", body = IssueDetails),
        (status = 400, description = "Invalid form or fine not confirmed", body = crate::error::ErrorResponse),
        (status = 404, description = "Issue not found"),
        (status = 422, description = "Issue already returned")
    )
)]
pub async fn complete_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CompleteReturn>,
) -> AppResult<Json<IssueDetails>> {
    claims.require_any(ALL_ROLES)?;
    request.validate()?;

    Ok(Json(state.services.issues.complete_return(request, today()).await?))
}
