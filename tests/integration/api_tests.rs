//! API integration tests, driving the router in-process over the demo data

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_desk::{
    api::create_router, config::AppConfig, repository::Repository, seed::seed_demo_data, AppState,
};

async fn app() -> Router {
    let repository = Repository::in_memory();
    seed_demo_data(&repository)
        .await
        .expect("Failed to seed demo data");
    create_router(AppState::new(AppConfig::default(), repository))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "adm", "password": "adm" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["home"], "/admin");
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "adm", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "", "password": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["username"], "Username is required");
    assert_eq!(body["fields"]["password"], "Password is required");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/reports/books", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_role_cannot_reach_maintenance() {
    let app = app().await;
    let token = login(&app, "user", "user").await;

    let (status, _) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/memberships/MEM001/cancel",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/reports/books", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = app().await;
    let token = login(&app, "adm", "adm").await;

    let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "adm");

    let (status, _) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_navigation_by_role() {
    let app = app().await;

    let admin = login(&app, "adm", "adm").await;
    let (status, body) = send(&app, Method::GET, "/navigation", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modules"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["modules"][0]["title"], "Maintenance");

    let user = login(&app, "user", "user").await;
    let (_, body) = send(&app, Method::GET, "/navigation", Some(&user), None).await;
    assert_eq!(body["modules"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["home"], "/user");
}

#[tokio::test]
async fn test_screen_guard() {
    let app = app().await;
    let guard = "/navigation/guard?path=/admin/maintenance";

    let (status, body) = send(&app, Method::GET, guard, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["redirect"], "/login");

    let user = login(&app, "user", "user").await;
    let (_, body) = send(&app, Method::GET, guard, Some(&user), None).await;
    assert_eq!(body["allowed"], false);
    assert_eq!(body["redirect"], "/login");

    let (_, body) = send(
        &app,
        Method::GET,
        "/navigation/guard?path=/transactions/issue-book",
        Some(&user),
        None,
    )
    .await;
    assert_eq!(body["allowed"], true);

    let admin = login(&app, "adm", "adm").await;
    let (_, body) = send(&app, Method::GET, guard, Some(&admin), None).await;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["redirect"], Value::Null);
}

#[tokio::test]
async fn test_check_availability() {
    let app = app().await;
    let token = login(&app, "user", "user").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/availability?name=mockingbird",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/availability?author=fitzgerald",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["serial_no"], "BK001");

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/availability?name=&author=",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Please enter either Book Name or Author Name to search"
    );
}

#[tokio::test]
async fn test_issue_takes_a_copy() {
    let app = app().await;
    let token = login(&app, "user", "user").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions/issues",
        Some(&token),
        Some(json!({ "membership_number": "MEM001", "serial_no": "BK001" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], "active");
    assert_eq!(body["item_name"], "The Great Gatsby");

    let (_, books) = send(&app, Method::GET, "/reports/books", Some(&token), None).await;
    let gatsby = books
        .as_array()
        .and_then(|b| b.iter().find(|i| i["serial_no"] == "BK001"))
        .cloned()
        .expect("BK001 listed");
    assert_eq!(gatsby["available"], 1);
}

#[tokio::test]
async fn test_issue_rejects_unavailable_copy() {
    let app = app().await;
    let token = login(&app, "adm", "adm").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/transactions/issues",
        Some(&token),
        Some(json!({ "membership_number": "MEM001", "serial_no": "BK002" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_overdue_return_flow() {
    let app = app().await;
    let token = login(&app, "adm", "adm").await;

    let (status, quote) = send(
        &app,
        Method::POST,
        "/transactions/returns/quote",
        Some(&token),
        Some(json!({ "serial_no": "BK002", "return_date": "2024-11-09" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", quote);
    assert_eq!(quote["issue_id"], "1");
    assert_eq!(quote["due_date"], "2024-10-30");
    assert_eq!(quote["days_late"], 10);
    assert_eq!(quote["fine"], "100");
    assert_eq!(quote["payment_required"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions/returns",
        Some(&token),
        Some(json!({ "issue_id": "1", "return_date": "2024-11-09", "fine_paid": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["fine_paid"],
        "Fine payment must be confirmed before completing the transaction"
    );

    let (_, still_out) = send(
        &app,
        Method::GET,
        "/transactions/availability?name=mockingbird",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(still_out, json!([]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions/returns",
        Some(&token),
        Some(json!({ "issue_id": "1", "return_date": "2024-11-09", "fine_paid": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "returned");
    assert_eq!(body["fine_paid"], true);

    let (_, back) = send(
        &app,
        Method::GET,
        "/transactions/availability?name=mockingbird",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(back[0]["available"], 1);
    assert_eq!(back[0]["status"], "available");
}

#[tokio::test]
async fn test_reports() {
    let app = app().await;
    let token = login(&app, "user", "user").await;

    let (status, overdue) = send(&app, Method::GET, "/reports/overdue", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overdue.as_array().map(Vec::len), Some(2));
    assert_eq!(overdue[0]["status"], "overdue");

    let (_, requests) = send(&app, Method::GET, "/reports/requests", Some(&token), None).await;
    assert_eq!(requests[1]["member_name"], "Jane Smith");
    assert_eq!(requests[1]["status"], "pending");

    let (_, movies) = send(&app, Method::GET, "/reports/movies", Some(&token), None).await;
    assert_eq!(movies[0]["serial_no"], "MV001");
}

#[tokio::test]
async fn test_membership_maintenance() {
    let app = app().await;
    let token = login(&app, "adm", "adm").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/memberships",
        Some(&token),
        Some(json!({
            "first_name": "Asha",
            "last_name": "Rao",
            "contact_no": "9123456780",
            "address": "7 Lake Rd, Pune",
            "aadhar_no": "2222-3333-4444",
            "start_date": "2024-08-31",
            "duration": "6M"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["membership_number"], "MEM003");
    assert_eq!(body["end_date"], "2025-02-28");

    let (status, body) = send(
        &app,
        Method::POST,
        "/memberships/MEM003/extend",
        Some(&token),
        Some(json!({ "duration": "1Y" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end_date"], "2026-02-28");

    let (status, body) = send(
        &app,
        Method::POST,
        "/memberships",
        Some(&token),
        Some(json!({
            "first_name": "",
            "last_name": "Rao",
            "contact_no": "12",
            "address": "x",
            "aadhar_no": "y"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["first_name"], "First name is required");
    assert_eq!(body["fields"]["contact_no"], "Invalid contact number");
}

#[tokio::test]
async fn test_deactivated_user_is_signed_out() {
    let app = app().await;
    let admin = login(&app, "adm", "adm").await;
    let user = login(&app, "user", "user").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/users/2",
        Some(&admin),
        Some(json!({ "name": "Standard User", "is_active": false, "is_admin": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/auth/me", Some(&user), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "user", "password": "user" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_demoted_admin_loses_admin_routes() {
    let app = app().await;
    let admin = login(&app, "adm", "adm").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(&admin),
        Some(json!({
            "username": "boss",
            "password": "boss",
            "name": "Head Librarian",
            "is_admin": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let id = body["id"].as_str().expect("No id in response").to_string();

    let boss = login(&app, "boss", "boss").await;
    let (status, _) = send(&app, Method::GET, "/users", Some(&boss), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&admin),
        Some(json!({ "name": "Head Librarian", "is_active": true, "is_admin": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The token issued while still an admin no longer works
    let (status, _) = send(&app, Method::GET, "/users", Some(&boss), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let boss = login(&app, "boss", "boss").await;
    let (status, _) = send(&app, Method::GET, "/users", Some(&boss), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
