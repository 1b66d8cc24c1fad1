use std::collections::BTreeMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{computer, profile, profile_attribute, profile_step};
use crate::response::Reply;
use crate::schemas::{CreateProfile, ProfileInfo, StepInfo};
use crate::services::progress;

/// Create a named profile (empty template, no presets).
pub async fn create_profile(
    db: &DatabaseConnection,
    data: CreateProfile,
) -> Result<Reply<ProfileInfo>> {
    data.validate()?;

    let txn = db.begin().await?;

    let existing = Profile::find()
        .filter(profile::Column::Name.eq(&data.name))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Profile '{}' already exists",
            data.name
        )));
    }

    let new_profile = profile::ActiveModel {
        name: Set(data.name),
        ..Default::default()
    };
    let created = new_profile.insert(&txn).await?;

    txn.commit().await?;

    Ok(Reply::new(
        format!("Profile '{}' created successfully", created.name),
        ProfileInfo::from(created),
    ))
}

/// Delete a profile by name. Every computer still referencing it is
/// deleted in the same transaction; a profile change elsewhere is the only
/// way to keep those machines.
pub async fn delete_profile(db: &DatabaseConnection, name: &str) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let profile = Profile::find()
        .filter(profile::Column::Name.eq(name))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile '{}' not found", name)))?;

    Computer::delete_many()
        .filter(computer::Column::ProfileId.eq(profile.id))
        .exec(&txn)
        .await?;

    let profile_name = profile.name.clone();
    profile.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(profile = %profile_name, "profile deleted with its computers");
    Ok(Reply::message(format!(
        "Profile '{}' and its computers deleted",
        profile_name
    )))
}

/// List all profiles.
pub async fn list_profiles(db: &DatabaseConnection) -> Result<Reply<Vec<ProfileInfo>>> {
    let profiles = Profile::find().all(db).await?;

    let message = if profiles.is_empty() {
        "No profiles have been created yet"
    } else {
        "Profiles retrieved successfully"
    };

    Ok(Reply::new(
        message,
        profiles.into_iter().map(ProfileInfo::from).collect(),
    ))
}

/// Steps in the profile's template set.
pub async fn get_profile_steps(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Reply<Vec<StepInfo>>> {
    let profile = find_profile(db, profile_id).await?;

    let steps = progress::template_steps(db, profile.id).await?;
    Ok(Reply::new(
        format!("Steps for profile '{}'", profile.name),
        steps.into_iter().map(StepInfo::from).collect(),
    ))
}

/// Steps not yet in the profile's template set.
pub async fn available_steps(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Reply<Vec<StepInfo>>> {
    let profile = find_profile(db, profile_id).await?;

    let assigned: Vec<i64> = progress::template_steps(db, profile.id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    let all_steps = SetupStep::find().all(db).await?;
    let available: Vec<StepInfo> = all_steps
        .into_iter()
        .filter(|s| !assigned.contains(&s.id))
        .map(StepInfo::from)
        .collect();

    Ok(Reply::new("Available steps retrieved", available))
}

/// Add a step to the profile's template. Computers already on the profile
/// pick it up lazily: it simply shows as remaining at the next progress
/// read.
pub async fn add_step_to_profile(
    db: &DatabaseConnection,
    profile_id: i64,
    step_id: i64,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let profile = find_profile(&txn, profile_id).await?;
    let step = find_step(&txn, step_id).await?;

    let existing = ProfileStep::find_by_id((profile.id, step.id)).one(&txn).await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Step '{}' is already assigned to profile '{}'",
            step.name, profile.name
        )));
    }

    let link = profile_step::ActiveModel {
        profile_id: Set(profile.id),
        step_id: Set(step.id),
    };
    link.insert(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Added '{}' to profile '{}'",
        step.name, profile.name
    )))
}

/// Remove a step from the profile's template. Completion markers on
/// computers are left alone; the progress diff stops enumerating the step.
pub async fn remove_step_from_profile(
    db: &DatabaseConnection,
    profile_id: i64,
    step_id: i64,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let profile = find_profile(&txn, profile_id).await?;
    let step = find_step(&txn, step_id).await?;

    let existing = ProfileStep::find_by_id((profile.id, step.id)).one(&txn).await?;
    if existing.is_none() {
        return Err(AppError::NotFound(format!(
            "Step '{}' is not assigned to profile '{}'",
            step.name, profile.name
        )));
    }

    ProfileStep::delete_by_id((profile.id, step.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Removed '{}' from profile '{}'",
        step.name, profile.name
    )))
}

/// Set or update one preset attribute.
pub async fn set_profile_attribute(
    db: &DatabaseConnection,
    profile_id: i64,
    key: &str,
    value: &str,
) -> Result<Reply<()>> {
    validate_attribute_key(key)?;

    let txn = db.begin().await?;

    let profile = find_profile(&txn, profile_id).await?;

    let existing = ProfileAttribute::find()
        .filter(profile_attribute::Column::ProfileId.eq(profile.id))
        .filter(profile_attribute::Column::Key.eq(key))
        .one(&txn)
        .await?;

    let message = match existing {
        Some(attr) => {
            let old_value = attr.value.clone();
            let mut attr_model: profile_attribute::ActiveModel = attr.into();
            attr_model.value = Set(value.to_string());
            attr_model.update(&txn).await?;
            format!(
                "Attribute '{}' updated for profile '{}' from '{}' to '{}'",
                key, profile.name, old_value, value
            )
        }
        None => {
            let new_attr = profile_attribute::ActiveModel {
                profile_id: Set(profile.id),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                ..Default::default()
            };
            new_attr.insert(&txn).await?;
            format!(
                "Attribute '{}' set to '{}' for profile '{}'",
                key, value, profile.name
            )
        }
    };

    txn.commit().await?;
    Ok(Reply::message(message))
}

/// Replace the profile's preset attributes with the given map: provided
/// keys are upserted, absent keys are deleted.
pub async fn set_profile_attributes(
    db: &DatabaseConnection,
    profile_id: i64,
    attributes: BTreeMap<String, String>,
) -> Result<Reply<()>> {
    for key in attributes.keys() {
        validate_attribute_key(key)?;
    }

    let txn = db.begin().await?;

    let profile = find_profile(&txn, profile_id).await?;

    let existing = ProfileAttribute::find()
        .filter(profile_attribute::Column::ProfileId.eq(profile.id))
        .all(&txn)
        .await?;

    let mut created = Vec::new();
    let mut updated = Vec::new();
    let mut deleted = Vec::new();

    for attr in &existing {
        if !attributes.contains_key(&attr.key) {
            deleted.push(attr.key.clone());
            ProfileAttribute::delete_by_id(attr.id).exec(&txn).await?;
        }
    }

    for (key, value) in &attributes {
        match existing.iter().find(|a| &a.key == key) {
            Some(attr) if &attr.value != value => {
                let mut attr_model: profile_attribute::ActiveModel = attr.clone().into();
                attr_model.value = Set(value.clone());
                attr_model.update(&txn).await?;
                updated.push(key.clone());
            }
            Some(_) => updated.push(key.clone()),
            None => {
                let new_attr = profile_attribute::ActiveModel {
                    profile_id: Set(profile.id),
                    key: Set(key.clone()),
                    value: Set(value.clone()),
                    ..Default::default()
                };
                new_attr.insert(&txn).await?;
                created.push(key.clone());
            }
        }
    }

    txn.commit().await?;

    Ok(Reply::message(attribute_change_message(
        &format!("profile '{}'", profile.name),
        &created,
        &updated,
        &deleted,
    )))
}

/// All preset attributes of a profile, as a key/value map.
pub async fn get_profile_attributes(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Reply<BTreeMap<String, String>>> {
    let profile = find_profile(db, profile_id).await?;

    let attributes: BTreeMap<String, String> = ProfileAttribute::find()
        .filter(profile_attribute::Column::ProfileId.eq(profile.id))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.key, a.value))
        .collect();

    Ok(Reply::new(
        format!("Attributes retrieved for profile '{}'", profile.name),
        attributes,
    ))
}

/// Delete one preset attribute.
pub async fn delete_profile_attribute(
    db: &DatabaseConnection,
    profile_id: i64,
    key: &str,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let profile = find_profile(&txn, profile_id).await?;

    let attribute = ProfileAttribute::find()
        .filter(profile_attribute::Column::ProfileId.eq(profile.id))
        .filter(profile_attribute::Column::Key.eq(key))
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Attribute '{}' not found for profile '{}'",
                key, profile.name
            ))
        })?;

    attribute.delete(&txn).await?;
    txn.commit().await?;

    Ok(Reply::message(format!(
        "Attribute '{}' deleted from profile '{}'",
        key, profile.name
    )))
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) async fn find_profile<C: ConnectionTrait>(
    conn: &C,
    profile_id: i64,
) -> Result<profile::Model> {
    Profile::find_by_id(profile_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile with ID {} not found", profile_id)))
}

async fn find_step<C: ConnectionTrait>(conn: &C, step_id: i64) -> Result<crate::models::setup_step::Model> {
    SetupStep::find_by_id(step_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setup step with ID {} not found", step_id)))
}

pub(crate) fn validate_attribute_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(AppError::Validation(
            "Attribute key must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn attribute_change_message(
    target: &str,
    created: &[String],
    updated: &[String],
    deleted: &[String],
) -> String {
    let mut parts = Vec::new();
    if !created.is_empty() {
        parts.push(format!("Created attributes: {}", created.join(", ")));
    }
    if !updated.is_empty() {
        parts.push(format!("Updated attributes: {}", updated.join(", ")));
    }
    if !deleted.is_empty() {
        parts.push(format!("Deleted attributes: {}", deleted.join(", ")));
    }

    if parts.is_empty() {
        format!("No changes made to attributes for {}", target)
    } else {
        format!("Attributes set for {}. {}", target, parts.join("; "))
    }
}
