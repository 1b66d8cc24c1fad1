//! Derives a computer's onboarding progress from its profile's template
//! step set and its completed step set.

use std::collections::HashSet;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::error::Result;
use crate::models::prelude::*;
use crate::models::{computer, computer_step, profile_step, setup_step};
use crate::schemas::StepInfo;

/// Completed/remaining/total view of a computer's setup work.
///
/// `total_count` is `completed + remaining`, so a completion that survives
/// from an earlier template is counted rather than dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Progress {
    pub completed_count: usize,
    pub remaining_count: usize,
    pub total_count: usize,
    pub completed: Vec<StepInfo>,
    pub remaining: Vec<StepInfo>,
}

/// Steps in a profile's template set, in store iteration order.
pub async fn template_steps<C: ConnectionTrait>(
    conn: &C,
    profile_id: i64,
) -> Result<Vec<setup_step::Model>> {
    Ok(SetupStep::find()
        .inner_join(ProfileStep)
        .filter(profile_step::Column::ProfileId.eq(profile_id))
        .all(conn)
        .await?)
}

/// Steps a computer has marked complete, in store iteration order.
pub async fn completed_steps<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
) -> Result<Vec<setup_step::Model>> {
    Ok(SetupStep::find()
        .inner_join(ComputerStep)
        .filter(computer_step::Column::ComputerId.eq(computer_id))
        .all(conn)
        .await?)
}

/// Set difference by step id: remaining = template − completed. Two steps
/// that happen to share a name are distinct entities and are never merged.
pub fn compute_progress(
    template: &[setup_step::Model],
    completed: &[setup_step::Model],
) -> Progress {
    let done: HashSet<i64> = completed.iter().map(|s| s.id).collect();

    let remaining: Vec<StepInfo> = template
        .iter()
        .filter(|s| !done.contains(&s.id))
        .cloned()
        .map(StepInfo::from)
        .collect();
    let completed: Vec<StepInfo> = completed.iter().cloned().map(StepInfo::from).collect();

    Progress {
        completed_count: completed.len(),
        remaining_count: remaining.len(),
        total_count: completed.len() + remaining.len(),
        completed,
        remaining,
    }
}

/// Resolve both step sets for a computer and diff them. A computer without
/// a profile has nothing to track: zero counts and empty lists, not an
/// error.
pub async fn load_progress<C: ConnectionTrait>(
    conn: &C,
    computer: &computer::Model,
) -> Result<Progress> {
    let Some(profile_id) = computer.profile_id else {
        return Ok(Progress::default());
    };

    let template = template_steps(conn, profile_id).await?;
    let completed = completed_steps(conn, computer.id).await?;
    Ok(compute_progress(&template, &completed))
}
