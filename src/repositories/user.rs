use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::profile;
use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repositories::profile::DEFAULT_PROFILE_PIC;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user together with its profile row, atomically
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            username: Set(input.username.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            password_hash: Set(password_hash.to_string()),
            is_active: Set(true),
            is_staff: Set(false),
            date_joined: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let created = model.insert(&txn).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("unique") {
                AppError::Conflict("User with this information already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        let profile = profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(created.id),
            profile_pic: Set(DEFAULT_PROFILE_PIC.to_string()),
        };
        profile.insert(&txn).await?;

        txn.commit().await?;
        Ok(created.into())
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Find user by email (for login)
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Check if email exists
    pub async fn email_exists(db: &DatabaseConnection, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Check if another user already holds this username
    pub async fn username_taken_by_other(
        db: &DatabaseConnection,
        username: &str,
        own_id: Uuid,
    ) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(Column::Username.eq(username))
            .filter(Column::Id.ne(own_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Check if another user already holds this email
    pub async fn email_taken_by_other(
        db: &DatabaseConnection,
        email: &str,
        own_id: Uuid,
    ) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Id.ne(own_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Apply a partial update. Username/email uniqueness is verified
    /// against other rows before anything is written, so a conflict
    /// leaves every column untouched.
    pub async fn update_details(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateUser,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if let Some(username) = &input.username {
            if Self::username_taken_by_other(db, username, id).await? {
                return Err(AppError::BadRequest("Username already taken".to_string()));
            }
        }
        if let Some(email) = &input.email {
            if Self::email_taken_by_other(db, email, id).await? {
                return Err(AppError::BadRequest("Email already registered".to_string()));
            }
        }

        let mut active: ActiveModel = model.into();

        if let Some(first_name) = &input.first_name {
            active.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &input.last_name {
            active.last_name = Set(last_name.clone());
        }
        if let Some(username) = &input.username {
            active.username = Set(Some(username.clone()));
        }
        if let Some(email) = &input.email {
            active.email = Set(email.clone());
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Store a freshly hashed password
    pub async fn update_password(
        db: &DatabaseConnection,
        id: Uuid,
        password_hash: &str,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            username: m.username,
            first_name: m.first_name,
            last_name: m.last_name,
            password_hash: m.password_hash,
            is_active: m.is_active,
            is_staff: m.is_staff,
            date_joined: m.date_joined,
            updated_at: m.updated_at,
        }
    }
}
