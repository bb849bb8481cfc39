use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One-to-one companion of a user row holding the profile picture path,
/// relative to the media root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_pic: String,
}

impl Profile {
    /// Public URL for the stored picture
    pub fn picture_url(&self) -> String {
        format!("/media/{}", self.profile_pic)
    }
}
