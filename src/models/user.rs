use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)] // Never expose password hash
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// User creation DTO (without id and timestamps)
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: Option<String>,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial user update; only present fields are applied
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Public user payload (everything but the password hash), served from
/// the account details endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    #[schema(value_type = String)]
    pub date_joined: OffsetDateTime,
    /// URL of the profile picture, if a profile row exists
    pub profile_pic: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: User, profile_pic: Option<String>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
            profile_pic,
        }
    }
}
