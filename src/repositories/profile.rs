use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entity::profile::{self, ActiveModel, Column, Entity as ProfileEntity};
use crate::error::AppResult;
use crate::models::Profile;

/// Placeholder shipped with the media root; every profile starts here
pub const DEFAULT_PROFILE_PIC: &str = "profile_pics/default.png";

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Fetch the profile for a user, creating the row with the default
    /// picture if it does not exist yet
    pub async fn get_or_create(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Profile> {
        let existing = ProfileEntity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?;

        if let Some(model) = existing {
            return Ok(model.into());
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            profile_pic: Set(DEFAULT_PROFILE_PIC.to_string()),
        };

        let created = model.insert(db).await?;
        Ok(created.into())
    }

    /// Point the profile at a newly stored picture path
    pub async fn set_picture(
        db: &DatabaseConnection,
        user_id: Uuid,
        path: &str,
    ) -> AppResult<Profile> {
        let existing = ProfileEntity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?;

        let updated = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.profile_pic = Set(path.to_string());
                active.update(db).await?
            }
            None => {
                let model = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    profile_pic: Set(path.to_string()),
                };
                model.insert(db).await?
            }
        };

        Ok(updated.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<profile::Model> for Profile {
    fn from(m: profile::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            profile_pic: m.profile_pic,
        }
    }
}
