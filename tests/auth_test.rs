mod common;

use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};
use onboardly::entity::user::{Column as UserColumn, Entity as UserEntity};

async fn user_count(app: &TestApp, email: &str) -> u64 {
    UserEntity::find()
        .filter(UserColumn::Email.eq(email))
        .count(&app.state.db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;
    let email = format!("signup-{}@example.com", Uuid::new_v4());

    let response = app
        .server
        .post("/user/signup/")
        .json(&json!({
            "email": email,
            "username": format!("user-{}", Uuid::new_v4()),
            "password": "purple-monkey-42",
            "first_name": "Avery",
            "last_name": "Chen"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "User registration successful"
    );
    assert_eq!(user_count(&app, &email).await, 1);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/signup/")
        .json(&json!({
            "email": auth.email,
            "password": "purple-monkey-42",
            "first_name": "Avery",
            "last_name": "Chen"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let messages: Vec<&str> = body["message"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap())
        .collect();
    assert!(messages.contains(&"Email already exists"));

    // The original row is the only one left standing
    assert_eq!(user_count(&app, &auth.email).await, 1);
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = TestApp::new().await;
    let email = format!("signup-{}@example.com", Uuid::new_v4());

    let response = app
        .server
        .post("/user/signup/")
        .json(&json!({
            "email": email,
            "password": "short1",
            "first_name": "Avery",
            "last_name": "Chen"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let messages = body["message"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap() == "Password must be at least 8 characters long"));
    assert_eq!(user_count(&app, &email).await, 0);
}

#[tokio::test]
async fn test_signup_entirely_numeric_password() {
    let app = TestApp::new().await;
    let email = format!("signup-{}@example.com", Uuid::new_v4());

    let response = app
        .server
        .post("/user/signup/")
        .json(&json!({
            "email": email,
            "password": "4093817265",
            "first_name": "Avery",
            "last_name": "Chen"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let messages = body["message"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap().contains("entirely numeric")));
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user/signup/")
        .json(&json!({
            "email": "not-an-email",
            "password": "purple-monkey-42",
            "first_name": "Avery",
            "last_name": "Chen"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let messages = body["message"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap().contains("Enter a valid email address")));
}

#[tokio::test]
async fn test_signup_missing_everything() {
    let app = TestApp::new().await;

    let response = app.server.post("/user/signup/").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    let messages = body["message"].as_array().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap() == "Email: This field is required."));
    assert!(messages
        .iter()
        .any(|m| m.as_str().unwrap() == "Password: This field is required."));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({
            "email": auth.email,
            "password": auth.password
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(!body["access"].as_str().unwrap().is_empty());
    assert!(!body["refresh"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"].as_str().unwrap(), auth.email);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({
            "email": format!("ghost-{}@example.com", Uuid::new_v4()),
            "password": "whatever-goes-1"
        }))
        .await;

    // 400, not 401: unknown emails never produce an auth-failure signal
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Invalid email address");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({
            "email": auth.email,
            "password": "wrong-password-1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Invalid password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({"email": "someone@example.com"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Email and password are required"
    );
}

#[tokio::test]
async fn test_token_obtain_and_refresh() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/api/token/")
        .json(&json!({
            "email": auth.email,
            "password": auth.password
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let access = body["access"].as_str().unwrap().to_string();
    let refresh = body["refresh"].as_str().unwrap().to_string();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    // Refresh buys a new working access token
    let response = app
        .server
        .post("/user/api/token/refresh/")
        .json(&json!({"refresh": refresh}))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let new_access = body["access"].as_str().unwrap();

    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", format!("Bearer {}", new_access))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_token_obtain_bad_credentials() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/api/token/")
        .json(&json!({
            "email": auth.email,
            "password": "wrong-password-1"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["detail"].as_str().unwrap(),
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    // An access token is not a refresh token
    let response = app
        .server
        .post("/user/api/token/refresh/")
        .json(&json!({"refresh": auth.token}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_refresh_token() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({
            "email": auth.email,
            "password": auth.password
        }))
        .await;
    let body: serde_json::Value = response.json();
    let refresh = body["refresh"].as_str().unwrap();

    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", format!("Bearer {}", refresh))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
