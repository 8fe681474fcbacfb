//! API handlers for Library Desk REST endpoints

pub mod auth;
pub mod health;
pub mod items;
pub mod memberships;
pub mod navigation;
pub mod openapi;
pub mod reports;
pub mod transactions;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use chrono::{NaiveDate, Utc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for the user of an open session, from the bearer token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = state.services.auth.authenticate(token).await?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Business date used by the desk
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/navigation", get(navigation::get_navigation))
        .route("/navigation/guard", get(navigation::check_screen))
        // Memberships
        .route(
            "/memberships",
            get(memberships::list_memberships).post(memberships::create_membership),
        )
        .route("/memberships/:number", get(memberships::get_membership))
        .route("/memberships/:number/extend", post(memberships::extend_membership))
        .route("/memberships/:number/cancel", post(memberships::cancel_membership))
        // Catalog items
        .route("/items", post(items::create_item))
        .route("/items/:serial", put(items::update_item))
        // Transactions
        .route("/transactions/availability", get(transactions::check_availability))
        .route("/transactions/issues", post(transactions::issue_book))
        .route("/transactions/returns/quote", post(transactions::quote_return))
        .route("/transactions/returns", post(transactions::complete_return))
        // Reports
        .route("/reports/books", get(reports::books))
        .route("/reports/movies", get(reports::movies))
        .route("/reports/memberships", get(reports::memberships))
        .route("/reports/active-issues", get(reports::active_issues))
        .route("/reports/overdue", get(reports::overdue_returns))
        .route("/reports/requests", get(reports::issue_requests))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", put(users::update_user))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
