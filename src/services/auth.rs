use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT Claims structure. The username rides along as a custom claim so
/// clients can display it without a profile round-trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub token_type: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// An access/refresh pair as issued at login
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct AuthService;

impl AuthService {
    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        let result = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        Ok(result)
    }

    /// Issue an access/refresh pair for a user
    pub fn generate_token_pair(user: &User, config: &Config) -> AppResult<TokenPair> {
        let access = Self::encode_token(
            user.id,
            &user.email,
            user.username.clone(),
            TOKEN_TYPE_ACCESS,
            Duration::minutes(config.access_token_minutes),
            config,
        )?;
        let refresh = Self::encode_token(
            user.id,
            &user.email,
            user.username.clone(),
            TOKEN_TYPE_REFRESH,
            Duration::days(config.refresh_token_days),
            config,
        )?;

        Ok(TokenPair { access, refresh })
    }

    /// Mint a fresh access token from the claims of a verified refresh
    /// token
    pub fn refresh_access_token(refresh_token: &str, config: &Config) -> AppResult<String> {
        let claims = Self::verify_token(refresh_token, TOKEN_TYPE_REFRESH, config)?;

        Self::encode_token(
            claims.sub,
            &claims.email,
            claims.username,
            TOKEN_TYPE_ACCESS,
            Duration::minutes(config.access_token_minutes),
            config,
        )
    }

    /// Verify and decode a JWT token, rejecting the wrong token type
    pub fn verify_token(token: &str, expected_type: &str, config: &Config) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        if token_data.claims.token_type != expected_type {
            return Err(AppError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    fn encode_token(
        user_id: Uuid,
        email: &str,
        username: Option<String>,
        token_type: &str,
        lifetime: Duration,
        config: &Config,
    ) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            username,
            token_type: token_type.to_string(),
            exp: (now + lifetime).unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(token)
    }
}
