use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::models::CreateUser;
use crate::repositories::UserRepository;
use crate::services::{is_valid_email, password_errors, AuthService};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Signup input. Everything is optional at the serde layer so missing
/// fields surface as field messages instead of a deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    pub email: String,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenObtainRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenRefreshResponse {
    pub access: String,
}

// ============ Handlers ============

/// Register a new user account
#[utoipa::path(
    post,
    path = "/user/signup/",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Validation failure, one message per failing field"),
        (status = 409, description = "Uniqueness conflict at the storage layer")
    ),
    tag = "Account"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let mut errors = Vec::new();

    let email = payload.email.as_deref().map(str::trim).unwrap_or("");
    if email.is_empty() {
        errors.push("Email: This field is required.".to_string());
    } else if !is_valid_email(email) {
        errors.push("Email: Enter a valid email address.".to_string());
    } else if UserRepository::email_exists(&state.db, email)
        .await
        .map_err(registration_error)?
    {
        errors.push("Email already exists".to_string());
    }

    let username = payload.username.as_deref().unwrap_or("");
    let first_name = payload.first_name.as_deref().unwrap_or("");
    let last_name = payload.last_name.as_deref().unwrap_or("");

    let password = payload.password.as_deref().unwrap_or("");
    if password.is_empty() {
        errors.push("Password: This field is required.".to_string());
    } else {
        let attributes = [
            ("email address", email),
            ("username", username),
            ("first name", first_name),
            ("last name", last_name),
        ];
        errors.extend(password_errors(password, &attributes));
    }

    if !errors.is_empty() {
        return Err(AppError::FieldErrors(errors));
    }

    let password_hash = AuthService::hash_password(password).map_err(registration_error)?;

    let input = CreateUser {
        email: email.to_string(),
        username: payload.username.clone().filter(|u| !u.is_empty()),
        password: password.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    };

    // A uniqueness violation here means another request won the race
    // after our email check passed; that one stays a 409.
    UserRepository::create(&state.db, &input, &password_hash)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => e,
            other => registration_error(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registration successful")),
    ))
}

/// Login with email and password, returning a token pair
#[utoipa::path(
    post,
    path = "/user/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing or invalid credentials")
    ),
    tag = "Account"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    // Unknown email answers 400, not 401: the account surface never
    // hands out a bare authentication-failure signal.
    let user = UserRepository::find_by_email(&state.db, email)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::BadRequest("Invalid email address".to_string()),
            other => login_error(other),
        })?;

    let password_ok =
        AuthService::verify_password(password, &user.password_hash).map_err(login_error)?;
    if !password_ok {
        return Err(AppError::BadRequest("Invalid password".to_string()));
    }

    let tokens = AuthService::generate_token_pair(&user, &state.config).map_err(login_error)?;

    Ok(Json(LoginResponse {
        refresh: tokens.refresh,
        access: tokens.access,
        user: LoginUser {
            email: user.email,
            username: user.username,
        },
    }))
}

/// Standard token-pair issuance
#[utoipa::path(
    post,
    path = "/user/api/token/",
    request_body = TokenObtainRequest,
    responses(
        (status = 200, description = "Token pair issued", body = TokenPairResponse),
        (status = 401, description = "No active account found with the given credentials")
    ),
    tag = "Tokens"
)]
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    Json(payload): Json<TokenObtainRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    let user = UserRepository::find_by_email(&state.db, email)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::InvalidCredentials,
            other => other,
        })?;

    if !user.is_active {
        return Err(AppError::InvalidCredentials);
    }

    if !AuthService::verify_password(password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let tokens = AuthService::generate_token_pair(&user, &state.config)?;

    Ok(Json(TokenPairResponse {
        refresh: tokens.refresh,
        access: tokens.access,
    }))
}

/// Standard token refresh: a valid refresh token buys a new access token
#[utoipa::path(
    post,
    path = "/user/api/token/refresh/",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "Fresh access token", body = TokenRefreshResponse),
        (status = 401, description = "Token is invalid or expired")
    ),
    tag = "Tokens"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRefreshRequest>,
) -> AppResult<Json<TokenRefreshResponse>> {
    let refresh = payload
        .refresh
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::BadRequest("Refresh token is required".to_string()))?;

    let access = AuthService::refresh_access_token(refresh, &state.config)?;

    Ok(Json(TokenRefreshResponse { access }))
}

// Detail stays in the log; the client gets generic wording.

fn registration_error(err: AppError) -> AppError {
    tracing::error!("Error in user registration: {}", err);
    AppError::Internal("An error occurred during registration".to_string())
}

fn login_error(err: AppError) -> AppError {
    tracing::error!("Login error: {}", err);
    AppError::Internal("An error occurred during login".to_string())
}
