use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfile {
    #[validate(length(min = 1, message = "Profile name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileInfo {
    pub id: i64,
    pub name: String,
}

impl From<profile::Model> for ProfileInfo {
    fn from(profile: profile::Model) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
        }
    }
}
