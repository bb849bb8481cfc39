use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::MessageResponse;
use crate::middlewares::AuthUser;
use crate::models::{UpdateUser, UserResponse};
use crate::repositories::{ProfileRepository, UserRepository};
use crate::services::{validation::MIN_PASSWORD_LENGTH, AuthService};
use crate::state::AppState;

// ============ Request DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ============ Handlers ============

/// Fetch the authenticated user's details
#[utoipa::path(
    get,
    path = "/user/details/",
    responses(
        (status = 200, description = "Current user details", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Account"
)]
pub async fn get_details(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let account = UserRepository::find_by_id(&state.db, user.id).await?;
    let profile = ProfileRepository::get_or_create(&state.db, user.id).await?;

    Ok(Json(UserResponse::from_user(
        account,
        Some(profile.picture_url()),
    )))
}

/// Update the authenticated user's details (multipart form).
///
/// Text parts first_name, last_name, username and email are applied only
/// when present. A profile_pic file part is stored under the media root
/// and saved to the profile row before the uniqueness checks run, so a
/// rejected email change does not roll the picture back.
#[utoipa::path(
    put,
    path = "/user/details/",
    responses(
        (status = 200, description = "Updated user details", body = UserResponse),
        (status = 400, description = "Username or email already in use by another account"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Account"
)]
pub async fn update_details(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UserResponse>> {
    let mut input = UpdateUser::default();
    let mut picture: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "first_name" => input.first_name = Some(read_text(field).await?),
            "last_name" => input.last_name = Some(read_text(field).await?),
            "username" => input.username = Some(read_text(field).await?),
            "email" => input.email = Some(read_text(field).await?),
            "profile_pic" => {
                let filename = field
                    .file_name()
                    .unwrap_or("profile.png")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                picture = Some((filename, data.to_vec()));
            }
            // Unknown parts are ignored
            _ => {}
        }
    }

    if let Some((filename, data)) = picture {
        let rel_path = save_profile_picture(&state.config.media_root, &filename, &data).await?;
        ProfileRepository::set_picture(&state.db, user.id, &rel_path).await?;
    }

    let updated = UserRepository::update_details(&state.db, user.id, &input).await?;
    let profile = ProfileRepository::get_or_create(&state.db, user.id).await?;

    Ok(Json(UserResponse::from_user(
        updated,
        Some(profile.picture_url()),
    )))
}

/// Change the authenticated user's password.
///
/// Tokens issued before the change are not revoked and keep working
/// until they expire.
#[utoipa::path(
    patch,
    path = "/user/details/",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing fields, short password or wrong current password"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Account"
)]
pub async fn change_password(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (current, new) = match (
        payload.current_password.as_deref(),
        payload.new_password.as_deref(),
    ) {
        (Some(c), Some(n)) if !c.is_empty() && !n.is_empty() => (c, n),
        _ => {
            return Err(AppError::BadRequest(
                "Current password and new password are required".to_string(),
            ))
        }
    };

    if new.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    let account = UserRepository::find_by_id(&state.db, user.id).await?;
    if !AuthService::verify_password(current, &account.password_hash)? {
        return Err(AppError::BadRequest(
            "Current password incorrect".to_string(),
        ));
    }

    let password_hash = AuthService::hash_password(new)?;
    UserRepository::update_password(&state.db, user.id, &password_hash).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ============ Helpers ============

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Write the uploaded bytes under MEDIA_ROOT/profile_pics and return the
/// stored path relative to the media root
async fn save_profile_picture(media_root: &str, filename: &str, data: &[u8]) -> AppResult<String> {
    let sanitized: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let rel_path = format!("profile_pics/{}-{}", Uuid::new_v4(), sanitized);
    let dir = format!("{}/profile_pics", media_root);
    let full_path = format!("{}/{}", media_root, rel_path);

    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        tracing::error!("Failed to create media directory {}: {}", dir, e);
        AppError::Internal("Failed to store profile picture".to_string())
    })?;
    tokio::fs::write(&full_path, data).await.map_err(|e| {
        tracing::error!("Failed to write profile picture {}: {}", full_path, e);
        AppError::Internal("Failed to store profile picture".to_string())
    })?;

    Ok(rel_path)
}
