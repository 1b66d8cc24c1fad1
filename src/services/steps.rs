use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{profile_step, setup_step};
use crate::response::Reply;
use crate::schemas::{CreateStep, StepInfo, UpdateStep};

/// Create a setup step with an optional download link.
pub async fn create_step(db: &DatabaseConnection, data: CreateStep) -> Result<Reply<StepInfo>> {
    data.validate()?;

    let txn = db.begin().await?;

    let existing = SetupStep::find()
        .filter(setup_step::Column::Name.eq(&data.name))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Setup step '{}' already exists",
            data.name
        )));
    }

    let new_step = setup_step::ActiveModel {
        name: Set(data.name),
        download_link: Set(data.download_link),
        ..Default::default()
    };
    let created = new_step.insert(&txn).await?;

    txn.commit().await?;

    Ok(Reply::new(
        format!("Setup step '{}' created", created.name),
        StepInfo::from(created),
    ))
}

/// List all setup steps.
pub async fn list_steps(db: &DatabaseConnection) -> Result<Reply<Vec<StepInfo>>> {
    let steps = SetupStep::find().all(db).await?;

    let message = if steps.is_empty() {
        "No setup steps have been created yet"
    } else {
        "Setup steps retrieved successfully"
    };

    Ok(Reply::new(
        message,
        steps.into_iter().map(StepInfo::from).collect(),
    ))
}

/// Update a step's name and/or download link.
pub async fn edit_step(
    db: &DatabaseConnection,
    step_id: i64,
    data: UpdateStep,
) -> Result<Reply<StepInfo>> {
    data.validate()?;

    let txn = db.begin().await?;

    let step = SetupStep::find_by_id(step_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setup step with ID {} not found", step_id)))?;

    // Reject a rename onto another step's name
    if let Some(ref new_name) = data.name {
        if new_name != &step.name {
            let existing = SetupStep::find()
                .filter(setup_step::Column::Name.eq(new_name))
                .one(&txn)
                .await?;
            if existing.is_some() {
                return Err(AppError::Conflict(format!(
                    "Setup step '{}' already exists",
                    new_name
                )));
            }
        }
    }

    // nothing to write when no field was provided
    let updated = if data.name.is_none() && data.download_link.is_none() {
        step
    } else {
        let mut step_model: setup_step::ActiveModel = step.into();
        if let Some(name) = data.name {
            step_model.name = Set(name);
        }
        if let Some(download_link) = data.download_link {
            step_model.download_link = Set(Some(download_link));
        }
        step_model.update(&txn).await?
    };

    txn.commit().await?;

    Ok(Reply::new(
        format!("Step '{}' updated successfully", updated.name),
        StepInfo::from(updated),
    ))
}

/// Number of profiles whose template references the step.
pub async fn step_usage_count(db: &DatabaseConnection, step_id: i64) -> Result<Reply<u64>> {
    let step = SetupStep::find_by_id(step_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setup step with ID {} not found", step_id)))?;

    let count = ProfileStep::find()
        .filter(profile_step::Column::StepId.eq(step.id))
        .count(db)
        .await?;

    Ok(Reply::new("Step usage retrieved", count))
}

/// Whether the step can be deleted without orphaning a profile template.
pub async fn can_delete_step(db: &DatabaseConnection, step_id: i64) -> Result<Reply<bool>> {
    let usage = step_usage_count(db, step_id).await?.payload;

    let message = if usage == 0 {
        "Step can be deleted".to_string()
    } else {
        format!("Step can not be deleted (used by {} profiles)", usage)
    };
    Ok(Reply::new(message, usage == 0))
}

/// Delete a step. Refused while any profile template still references it;
/// completion markers on computers are cleaned up by the store.
pub async fn delete_step(db: &DatabaseConnection, step_id: i64) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let step = SetupStep::find_by_id(step_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setup step with ID {} not found", step_id)))?;

    let usage = ProfileStep::find()
        .filter(profile_step::Column::StepId.eq(step.id))
        .count(&txn)
        .await?;
    if usage > 0 {
        return Err(AppError::Conflict(format!(
            "Setup step '{}' is used by {} profiles and can not be deleted",
            step.name, usage
        )));
    }

    let name = step.name.clone();
    step.delete(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Setup step '{}' deleted successfully",
        name
    )))
}
