mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_get_details() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["email"].as_str().unwrap(), auth.email);
    assert_eq!(body["first_name"].as_str().unwrap(), "Sam");
    // The hash never leaves the server
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
    // The profile row is created on first access with the placeholder
    assert_eq!(
        body["profile_pic"].as_str().unwrap(),
        "/media/profile_pics/default.png"
    );
}

#[tokio::test]
async fn test_get_details_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.server.get("/user/details/").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_details_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", "Bearer not-a-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_details_partial() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let form = MultipartForm::new().add_text("first_name", "Noor");

    let response = app
        .server
        .put("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["first_name"].as_str().unwrap(), "Noor");
    // Untouched fields keep their values
    assert_eq!(body["last_name"].as_str().unwrap(), "Rivera");
    assert_eq!(body["email"].as_str().unwrap(), auth.email);
}

#[tokio::test]
async fn test_update_details_username_conflict() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let taken = format!("taken-{}", Uuid::new_v4());
    factory.create_user_with_username(&taken).await;

    let mine = format!("mine-{}", Uuid::new_v4());
    let auth = factory.create_user_with_username(&mine).await;

    let form = MultipartForm::new().add_text("username", taken.clone());

    let response = app
        .server
        .put("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Username already taken");

    // The requester's own username is unchanged in storage
    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["username"].as_str().unwrap(), mine);
}

#[tokio::test]
async fn test_update_details_email_conflict_is_all_or_nothing() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let other = factory.create_user().await;
    let auth = factory.create_user().await;

    // first_name would be valid on its own, but the email conflict
    // aborts the whole update
    let form = MultipartForm::new()
        .add_text("first_name", "Noor")
        .add_text("email", other.email.clone());

    let response = app
        .server
        .put("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Email already registered");

    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["first_name"].as_str().unwrap(), "Sam");
    assert_eq!(body["email"].as_str().unwrap(), auth.email);
}

#[tokio::test]
async fn test_update_details_with_picture() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let picture = Part::bytes(vec![0x89u8, 0x50, 0x4e, 0x47])
        .file_name("avatar.png")
        .mime_type("image/png");
    let form = MultipartForm::new().add_part("profile_pic", picture);

    let response = app
        .server
        .put("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let pic_url = body["profile_pic"].as_str().unwrap();
    assert!(pic_url.starts_with("/media/profile_pics/"));
    assert!(pic_url.ends_with("avatar.png"));
    assert_ne!(pic_url, "/media/profile_pics/default.png");

    // The stored file is served from the media root
    let response = app.server.get(pic_url).await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "current_password": auth.password,
            "new_password": "fresh-new-secret-9"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Password updated successfully"
    );

    // Old password no longer authenticates, the new one does
    let response = app
        .server
        .post("/user/login/")
        .json(&json!({"email": auth.email, "password": auth.password}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/user/login/")
        .json(&json!({"email": auth.email, "password": "fresh-new-secret-9"}))
        .await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "current_password": "not-my-password-1",
            "new_password": "fresh-new-secret-9"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Current password incorrect"
    );

    // The old password still authenticates
    let response = app
        .server
        .post("/user/login/")
        .json(&json!({"email": auth.email, "password": auth.password}))
        .await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_too_short() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "current_password": auth.password,
            "new_password": "tiny1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"].as_str().unwrap(),
        "Password must be at least 8 characters long"
    );
}

#[tokio::test]
async fn test_change_password_missing_fields() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({"new_password": "fresh-new-secret-9"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_old_token_survives_password_change() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .patch("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "current_password": auth.password,
            "new_password": "fresh-new-secret-9"
        }))
        .await;
    response.assert_status(StatusCode::OK);

    // Current behavior: tokens issued before the change are not revoked
    let response = app
        .server
        .get("/user/details/")
        .add_header("Authorization", auth.auth_header())
        .await;
    response.assert_status(StatusCode::OK);
}
