use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::setup_step;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStep {
    #[validate(length(min = 1, message = "Step name must not be empty"))]
    pub name: String,
    pub download_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStep {
    #[validate(length(min = 1, message = "Step name must not be empty"))]
    pub name: Option<String>,
    pub download_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    pub id: i64,
    pub name: String,
    pub download_link: Option<String>,
}

impl From<setup_step::Model> for StepInfo {
    fn from(step: setup_step::Model) -> Self {
        Self {
            id: step.id,
            name: step.name,
            download_link: step.download_link,
        }
    }
}
