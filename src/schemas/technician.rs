use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::technician;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTechnician {
    #[validate(length(min = 1, message = "Technician name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Public view of a technician. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianInfo {
    pub id: i64,
    pub name: String,
}

impl From<technician::Model> for TechnicianInfo {
    fn from(technician: technician::Model) -> Self {
        Self {
            id: technician.id,
            name: technician.name,
        }
    }
}
