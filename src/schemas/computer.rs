use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::progress::Progress;

use super::profile::ProfileInfo;
use super::technician::TechnicianInfo;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComputer {
    #[validate(length(min = 1, message = "Computer name must not be empty"))]
    pub name: String,
    /// Expected as `YYYY-MM-DD HH:MM`; parsed before any mutation happens.
    pub deadline: Option<String>,
    pub notes: Option<String>,
    pub profile_id: Option<i64>,
    #[serde(default)]
    pub technician_ids: Vec<i64>,
}

/// Aggregate view of a single computer with its derived progress.
#[derive(Debug, Clone, Serialize)]
pub struct ComputerInfo {
    pub id: i64,
    pub name: String,
    pub profile: Option<ProfileInfo>,
    pub technicians: Vec<TechnicianInfo>,
    pub deadline: Option<DateTime<Utc>>,
    pub notes: String,
    pub attributes: BTreeMap<String, String>,
    pub progress: Progress,
}

/// Row shape of the computers listing.
#[derive(Debug, Clone, Serialize)]
pub struct ComputerOverview {
    pub id: i64,
    pub name: String,
    pub profile_id: Option<i64>,
    pub deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub completed_step_ids: Vec<i64>,
    pub technicians: Vec<TechnicianInfo>,
    pub attributes: BTreeMap<String, String>,
}

/// Result of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}
