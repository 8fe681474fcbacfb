//! Role-specific home menu and screen guard

use axum::{extract::Query, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::services::navigation::{navigation_for, screen_access, Navigation, ScreenAccess};

use super::AuthenticatedUser;

/// Modules and screens available to the signed-in role
#[utoipa::path(
    get,
    path = "/navigation",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Home menu for the session role", body = Navigation),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_navigation(AuthenticatedUser(claims): AuthenticatedUser) -> Json<Navigation> {
    Json(navigation_for(claims.role))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GuardQuery {
    /// Screen path, e.g. /admin/maintenance
    pub path: String,
}

/// Whether the caller may open a screen; callers without an open session are sent to login
#[utoipa::path(
    get,
    path = "/navigation/guard",
    tag = "auth",
    params(GuardQuery),
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Guard decision", body = ScreenAccess)
    )
)]
pub async fn check_screen(
    user: Option<AuthenticatedUser>,
    Query(query): Query<GuardQuery>,
) -> Json<ScreenAccess> {
    let role = user.map(|AuthenticatedUser(claims)| claims.role);
    Json(screen_access(&query.path, role))
}
