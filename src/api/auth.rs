//! Login, logout and current session endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppResult, FormErrors},
    models::user::UserInfo,
    services::auth::Session,
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token, valid until logout or expiry
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub user: UserInfo,
    /// Landing page for the user's role
    pub home: String,
}

/// Authenticate and open a session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid username or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let mut errors = FormErrors::new();
    errors.require("username", &request.username, "Username is required");
    errors.require("password", &request.password, "Password is required");
    errors.into_result()?;

    let (token, user) = state
        .services
        .auth
        .login(request.username.trim(), &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.auth.jwt_expiration_hours * 3600,
        home: user.role.home_path().to_string(),
        user,
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<StatusCode> {
    state.services.auth.logout(claims.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current session and user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Session>> {
    let session = state.services.auth.current_session(claims.session_id).await?;
    Ok(Json(session))
}
