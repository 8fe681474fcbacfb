//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, items, memberships, navigation, reports, transactions, users};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Desk API",
        version = "0.3.0",
        description = "Lending desk for books, movies, memberships and fines",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        navigation::get_navigation,
        navigation::check_screen,
        // Memberships
        memberships::list_memberships,
        memberships::get_membership,
        memberships::create_membership,
        memberships::extend_membership,
        memberships::cancel_membership,
        // Items
        items::create_item,
        items::update_item,
        // Transactions
        transactions::check_availability,
        transactions::issue_book,
        transactions::quote_return,
        transactions::complete_return,
        // Reports
        reports::books,
        reports::movies,
        reports::memberships,
        reports::active_issues,
        reports::overdue_returns,
        reports::issue_requests,
        // Users
        users::list_users,
        users::create_user,
        users::update_user,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::services::auth::Session,
            crate::services::navigation::Navigation,
            crate::services::navigation::NavModule,
            crate::services::navigation::NavLink,
            crate::services::navigation::ScreenAccess,
            // Memberships
            crate::models::membership::Membership,
            crate::models::membership::MembershipDuration,
            crate::models::membership::MembershipStatus,
            crate::models::membership::CreateMembership,
            crate::models::membership::ExtendMembership,
            // Items
            crate::models::item::CatalogItem,
            crate::models::item::ItemKind,
            crate::models::item::ItemStatus,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            // Issues
            crate::models::issue::IssueStatus,
            crate::models::issue::IssueDetails,
            crate::models::issue::CreateIssue,
            crate::models::issue::ReturnQuoteRequest,
            crate::models::issue::ReturnQuote,
            crate::models::issue::CompleteReturn,
            crate::models::request::RequestStatus,
            crate::models::request::IssueRequestDetails,
            // Users
            crate::models::user::Role,
            crate::models::user::UserInfo,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sessions and navigation"),
        (name = "memberships", description = "Membership maintenance"),
        (name = "items", description = "Book and movie maintenance"),
        (name = "transactions", description = "Availability, issues, returns and fines"),
        (name = "reports", description = "Master lists and issue reports"),
        (name = "users", description = "Desk user management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
