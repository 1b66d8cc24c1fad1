use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{
    computer, computer_attribute, computer_step, computer_technician, profile_attribute,
    setup_step, technician,
};
use crate::response::Reply;
use crate::schemas::{
    ComputerInfo, ComputerOverview, CreateComputer, ProfileInfo, TechnicianInfo, ToggleOutcome,
};
use crate::services::{profiles, progress};

/// Deadlines are collected as text by every front end; this is the one
/// accepted shape.
const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Create a computer, optionally on a profile and assigned to technicians.
/// All referenced ids are validated before anything is written; a profile
/// brings its preset attributes with it.
pub async fn create_computer(
    db: &DatabaseConnection,
    data: CreateComputer,
) -> Result<Reply<ComputerInfo>> {
    data.validate()?;
    let deadline = data.deadline.as_deref().map(parse_deadline).transpose()?;

    let txn = db.begin().await?;

    let existing = Computer::find()
        .filter(computer::Column::Name.eq(&data.name))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Computer '{}' already exists",
            data.name
        )));
    }

    let technicians = find_technicians_checked(&txn, &data.technician_ids).await?;

    let profile = match data.profile_id {
        Some(profile_id) => Some(profiles::find_profile(&txn, profile_id).await?),
        None => None,
    };

    let new_computer = computer::ActiveModel {
        name: Set(data.name),
        deadline: Set(deadline),
        notes: Set(data.notes),
        profile_id: Set(profile.as_ref().map(|p| p.id)),
        ..Default::default()
    };
    let created = new_computer.insert(&txn).await?;

    for tech in &technicians {
        let link = computer_technician::ActiveModel {
            computer_id: Set(created.id),
            technician_id: Set(tech.id),
        };
        link.insert(&txn).await?;
    }

    let mut preset_keys = Vec::new();
    if let Some(ref profile) = profile {
        preset_keys = seed_attributes_from_profile(&txn, created.id, profile.id).await?;
    }

    let mut message = format!("Computer '{}' was created", created.name);
    if !technicians.is_empty() {
        let names: Vec<&str> = technicians.iter().map(|t| t.name.as_str()).collect();
        message.push_str(&format!(
            " and assigned to technicians: {}",
            names.join(", ")
        ));
    }
    if !preset_keys.is_empty() {
        message.push_str(&format!(
            ". Preset attributes applied: {}",
            preset_keys.join(", ")
        ));
    }

    let info = build_computer_info(&txn, created).await?;
    txn.commit().await?;

    tracing::info!(computer = %info.name, "computer created");
    Ok(Reply::new(message, info))
}

/// Rename a computer.
pub async fn edit_computer_name(
    db: &DatabaseConnection,
    computer_id: i64,
    new_name: &str,
) -> Result<Reply<()>> {
    if new_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Computer name must not be empty".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let existing = Computer::find()
        .filter(computer::Column::Name.eq(new_name))
        .one(&txn)
        .await?;
    if let Some(existing) = existing {
        if existing.id != computer.id {
            return Err(AppError::Conflict(format!(
                "Computer name '{}' already exists",
                new_name
            )));
        }
    }

    let old_name = computer.name.clone();
    let mut computer_model: computer::ActiveModel = computer.into();
    computer_model.name = Set(new_name.to_string());
    computer_model.update(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Computer name changed from '{}' to '{}'",
        old_name, new_name
    )))
}

/// Set a computer's deadline from its textual form.
pub async fn edit_computer_deadline(
    db: &DatabaseConnection,
    computer_id: i64,
    new_deadline: &str,
) -> Result<Reply<()>> {
    let deadline = parse_deadline(new_deadline)?;

    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let old_deadline = computer
        .deadline
        .map(|d| d.format(DEADLINE_FORMAT).to_string())
        .unwrap_or_else(|| "none".to_string());
    let name = computer.name.clone();

    let mut computer_model: computer::ActiveModel = computer.into();
    computer_model.deadline = Set(Some(deadline));
    computer_model.update(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Computer '{}' deadline changed from {} to {}",
        name, old_deadline, new_deadline
    )))
}

/// Replace a computer's free-form notes.
pub async fn edit_computer_notes(
    db: &DatabaseConnection,
    computer_id: i64,
    notes: &str,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;
    let name = computer.name.clone();

    let mut computer_model: computer::ActiveModel = computer.into();
    computer_model.notes = Set(Some(notes.to_string()));
    computer_model.update(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Notes updated for computer '{}'",
        name
    )))
}

/// Move a computer onto another profile. Progress tracking and attribute
/// defaults belong to the template, so both reset with the reassignment:
/// completed steps are cleared and attributes are replaced by the new
/// profile's presets, all in one transaction.
pub async fn assign_profile(
    db: &DatabaseConnection,
    computer_id: i64,
    profile_id: i64,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;
    let profile = profiles::find_profile(&txn, profile_id).await?;

    if computer.profile_id == Some(profile.id) {
        return Err(AppError::Conflict(format!(
            "Computer '{}' already has profile '{}' assigned",
            computer.name, profile.name
        )));
    }

    let old_profile_name = match computer.profile_id {
        Some(old_id) => profiles::find_profile(&txn, old_id).await?.name,
        None => "No profile".to_string(),
    };
    let computer_name = computer.name.clone();

    let mut computer_model: computer::ActiveModel = computer.into();
    computer_model.profile_id = Set(Some(profile.id));
    computer_model.update(&txn).await?;

    ComputerStep::delete_many()
        .filter(computer_step::Column::ComputerId.eq(computer_id))
        .exec(&txn)
        .await?;

    ComputerAttribute::delete_many()
        .filter(computer_attribute::Column::ComputerId.eq(computer_id))
        .exec(&txn)
        .await?;
    let preset_keys = seed_attributes_from_profile(&txn, computer_id, profile.id).await?;

    txn.commit().await?;

    let mut message = format!(
        "Computer '{}' profile changed from '{}' to '{}'. Setup steps have been reset.",
        computer_name, old_profile_name, profile.name
    );
    if !preset_keys.is_empty() {
        message.push_str(&format!(
            " Preset attributes applied: {}",
            preset_keys.join(", ")
        ));
    }

    tracing::info!(computer = %computer_name, profile = %profile.name, "profile reassigned");
    Ok(Reply::message(message))
}

/// Replace the computer's assigned technician set. Every requested id must
/// exist before anything is written; an empty set unassigns everyone.
pub async fn assign_technicians(
    db: &DatabaseConnection,
    computer_id: i64,
    technician_ids: &[i64],
) -> Result<Reply<Vec<TechnicianInfo>>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;
    let technicians = find_technicians_checked(&txn, technician_ids).await?;

    ComputerTechnician::delete_many()
        .filter(computer_technician::Column::ComputerId.eq(computer.id))
        .exec(&txn)
        .await?;

    for tech in &technicians {
        let link = computer_technician::ActiveModel {
            computer_id: Set(computer.id),
            technician_id: Set(tech.id),
        };
        link.insert(&txn).await?;
    }

    txn.commit().await?;

    let message = if technicians.is_empty() {
        format!("All technicians unassigned from '{}'", computer.name)
    } else {
        let names: Vec<&str> = technicians.iter().map(|t| t.name.as_str()).collect();
        format!(
            "Computer '{}' now assigned to technicians: {}",
            computer.name,
            names.join(", ")
        )
    };

    Ok(Reply::new(
        message,
        technicians.into_iter().map(TechnicianInfo::from).collect(),
    ))
}

/// Delete a computer. Completion markers, technician links and attributes
/// go with it.
pub async fn delete_computer(db: &DatabaseConnection, computer_id: i64) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;
    let name = computer.name.clone();
    computer.delete(&txn).await?;

    txn.commit().await?;

    Ok(Reply::message(format!(
        "Computer '{}' has been deleted successfully",
        name
    )))
}

/// Flip a step's completion state for a computer. Adding and removing are
/// internal primitives; the toggle is the only exposed operation and
/// touches nothing but the completion set.
pub async fn toggle_step(
    db: &DatabaseConnection,
    computer_id: i64,
    step_name: &str,
) -> Result<Reply<ToggleOutcome>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let step = SetupStep::find()
        .filter(setup_step::Column::Name.eq(step_name))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setup step '{}' not found", step_name)))?;

    let reply = if remove_completed_step(&txn, computer.id, step.id).await? {
        Reply::new(
            format!("Step '{}' removed from '{}'", step.name, computer.name),
            ToggleOutcome::Removed,
        )
    } else {
        add_completed_step(&txn, computer.id, step.id).await?;
        Reply::new(
            format!(
                "Marked step '{}' as complete for '{}'",
                step.name, computer.name
            ),
            ToggleOutcome::Added,
        )
    };

    txn.commit().await?;
    Ok(reply)
}

/// Completed/remaining/total for one computer.
pub async fn get_computer_progress(
    db: &DatabaseConnection,
    computer_id: i64,
) -> Result<Reply<progress::Progress>> {
    let computer = find_computer(db, computer_id).await?;
    let progress = progress::load_progress(db, &computer).await?;

    Ok(Reply::new(
        format!("Progress for computer '{}'", computer.name),
        progress,
    ))
}

/// Aggregate view of one computer: identity, profile, technicians,
/// attributes and derived progress.
pub async fn get_computer_info(
    db: &DatabaseConnection,
    computer_id: i64,
) -> Result<Reply<ComputerInfo>> {
    let computer = find_computer(db, computer_id).await?;
    let name = computer.name.clone();
    let info = build_computer_info(db, computer).await?;

    Ok(Reply::new(format!("Computer '{}' found", name), info))
}

/// List all computers with their associations resolved.
pub async fn list_computers(db: &DatabaseConnection) -> Result<Reply<Vec<ComputerOverview>>> {
    let computers = Computer::find().all(db).await?;

    let message = if computers.is_empty() {
        "No computers have been created yet"
    } else {
        "Computers retrieved successfully"
    };

    let mut overviews = Vec::with_capacity(computers.len());
    for computer in computers {
        let completed_step_ids: Vec<i64> = ComputerStep::find()
            .filter(computer_step::Column::ComputerId.eq(computer.id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.step_id)
            .collect();

        let technicians = assigned_technicians(db, computer.id).await?;
        let attributes = attribute_map(db, computer.id).await?;

        overviews.push(ComputerOverview {
            id: computer.id,
            name: computer.name,
            profile_id: computer.profile_id,
            deadline: computer.deadline,
            notes: computer.notes,
            completed_step_ids,
            technicians: technicians.into_iter().map(TechnicianInfo::from).collect(),
            attributes,
        });
    }

    Ok(Reply::new(message, overviews))
}

/// Set or update one custom attribute.
pub async fn set_computer_attribute(
    db: &DatabaseConnection,
    computer_id: i64,
    key: &str,
    value: &str,
) -> Result<Reply<()>> {
    profiles::validate_attribute_key(key)?;

    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let existing = ComputerAttribute::find()
        .filter(computer_attribute::Column::ComputerId.eq(computer.id))
        .filter(computer_attribute::Column::Key.eq(key))
        .one(&txn)
        .await?;

    let message = match existing {
        Some(attr) => {
            let old_value = attr.value.clone();
            let mut attr_model: computer_attribute::ActiveModel = attr.into();
            attr_model.value = Set(value.to_string());
            attr_model.update(&txn).await?;
            format!(
                "Attribute '{}' updated for computer '{}' from '{}' to '{}'",
                key, computer.name, old_value, value
            )
        }
        None => {
            let new_attr = computer_attribute::ActiveModel {
                computer_id: Set(computer.id),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                ..Default::default()
            };
            new_attr.insert(&txn).await?;
            format!(
                "Attribute '{}' set to '{}' for computer '{}'",
                key, value, computer.name
            )
        }
    };

    txn.commit().await?;
    Ok(Reply::message(message))
}

/// Look up one custom attribute. An absent key is not an error; the
/// payload is simply empty.
pub async fn get_computer_attribute(
    db: &DatabaseConnection,
    computer_id: i64,
    key: &str,
) -> Result<Reply<Option<String>>> {
    let computer = find_computer(db, computer_id).await?;

    let attribute = ComputerAttribute::find()
        .filter(computer_attribute::Column::ComputerId.eq(computer.id))
        .filter(computer_attribute::Column::Key.eq(key))
        .one(db)
        .await?;

    let reply = match attribute {
        Some(attr) => Reply::new(
            format!("Attribute '{}' found for computer '{}'", key, computer.name),
            Some(attr.value),
        ),
        None => Reply::new(
            format!(
                "Attribute '{}' not found for computer '{}'",
                key, computer.name
            ),
            None,
        ),
    };
    Ok(reply)
}

/// All custom attributes of a computer, as a key/value map.
pub async fn get_computer_attributes(
    db: &DatabaseConnection,
    computer_id: i64,
) -> Result<Reply<BTreeMap<String, String>>> {
    let computer = find_computer(db, computer_id).await?;
    let attributes = attribute_map(db, computer.id).await?;

    Ok(Reply::new(
        format!("Attributes retrieved for computer '{}'", computer.name),
        attributes,
    ))
}

/// Delete one custom attribute.
pub async fn delete_computer_attribute(
    db: &DatabaseConnection,
    computer_id: i64,
    key: &str,
) -> Result<Reply<()>> {
    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let attribute = ComputerAttribute::find()
        .filter(computer_attribute::Column::ComputerId.eq(computer.id))
        .filter(computer_attribute::Column::Key.eq(key))
        .one(&txn)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Attribute '{}' not found for computer '{}'",
                key, computer.name
            ))
        })?;

    attribute.delete(&txn).await?;
    txn.commit().await?;

    Ok(Reply::message(format!(
        "Attribute '{}' deleted from computer '{}'",
        key, computer.name
    )))
}

/// Replace the computer's custom attributes with the given map: provided
/// keys are upserted, absent keys are deleted.
pub async fn set_computer_attributes(
    db: &DatabaseConnection,
    computer_id: i64,
    attributes: BTreeMap<String, String>,
) -> Result<Reply<()>> {
    for key in attributes.keys() {
        profiles::validate_attribute_key(key)?;
    }

    let txn = db.begin().await?;

    let computer = find_computer(&txn, computer_id).await?;

    let existing = ComputerAttribute::find()
        .filter(computer_attribute::Column::ComputerId.eq(computer.id))
        .all(&txn)
        .await?;

    let mut created = Vec::new();
    let mut updated = Vec::new();
    let mut deleted = Vec::new();

    for attr in &existing {
        if !attributes.contains_key(&attr.key) {
            deleted.push(attr.key.clone());
            ComputerAttribute::delete_by_id(attr.id).exec(&txn).await?;
        }
    }

    for (key, value) in &attributes {
        match existing.iter().find(|a| &a.key == key) {
            Some(attr) if &attr.value != value => {
                let mut attr_model: computer_attribute::ActiveModel = attr.clone().into();
                attr_model.value = Set(value.clone());
                attr_model.update(&txn).await?;
                updated.push(key.clone());
            }
            Some(_) => updated.push(key.clone()),
            None => {
                let new_attr = computer_attribute::ActiveModel {
                    computer_id: Set(computer.id),
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

    Ok(Reply::message(profiles::attribute_change_message(
        &format!("computer '{}'", computer.name),
        &created,
        &updated,
        &deleted,
    )))
}

// ============================================================================
// Helpers
// ============================================================================

async fn find_computer<C: ConnectionTrait>(conn: &C, computer_id: i64) -> Result<computer::Model> {
    Computer::find_by_id(computer_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Computer with ID {} not found", computer_id)))
}

/// Load technicians by id, all-or-nothing: any unknown id fails the whole
/// call before mutation.
async fn find_technicians_checked<C: ConnectionTrait>(
    conn: &C,
    technician_ids: &[i64],
) -> Result<Vec<technician::Model>> {
    let requested: HashSet<i64> = technician_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let technicians = Technician::find()
        .filter(technician::Column::Id.is_in(requested.iter().copied()))
        .all(conn)
        .await?;

    if technicians.len() != requested.len() {
        let found: HashSet<i64> = technicians.iter().map(|t| t.id).collect();
        let missing: Vec<String> = requested
            .difference(&found)
            .map(|id| id.to_string())
            .collect();
        return Err(AppError::NotFound(format!(
            "Technician IDs not found: {}",
            missing.join(", ")
        )));
    }

    Ok(technicians)
}

/// Copy a profile's preset attributes onto a computer; returns the keys
/// applied. Callers clear the computer's attributes first where needed, so
/// key collisions can not occur.
async fn seed_attributes_from_profile<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
    profile_id: i64,
) -> Result<Vec<String>> {
    let presets = ProfileAttribute::find()
        .filter(profile_attribute::Column::ProfileId.eq(profile_id))
        .all(conn)
        .await?;

    let mut keys = Vec::with_capacity(presets.len());
    for preset in presets {
        let new_attr = computer_attribute::ActiveModel {
            computer_id: Set(computer_id),
            key: Set(preset.key.clone()),
            value: Set(preset.value),
            ..Default::default()
        };
        new_attr.insert(conn).await?;
        keys.push(preset.key);
    }

    Ok(keys)
}

async fn assigned_technicians<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
) -> Result<Vec<technician::Model>> {
    Ok(Technician::find()
        .inner_join(ComputerTechnician)
        .filter(computer_technician::Column::ComputerId.eq(computer_id))
        .all(conn)
        .await?)
}

async fn attribute_map<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
) -> Result<BTreeMap<String, String>> {
    Ok(ComputerAttribute::find()
        .filter(computer_attribute::Column::ComputerId.eq(computer_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|a| (a.key, a.value))
        .collect())
}

async fn build_computer_info<C: ConnectionTrait>(
    conn: &C,
    computer: computer::Model,
) -> Result<ComputerInfo> {
    let profile = match computer.profile_id {
        Some(profile_id) => Profile::find_by_id(profile_id).one(conn).await?,
        None => None,
    };
    let technicians = assigned_technicians(conn, computer.id).await?;
    let attributes = attribute_map(conn, computer.id).await?;
    let progress = progress::load_progress(conn, &computer).await?;

    Ok(ComputerInfo {
        id: computer.id,
        name: computer.name,
        profile: profile.map(ProfileInfo::from),
        technicians: technicians.into_iter().map(TechnicianInfo::from).collect(),
        deadline: computer.deadline,
        notes: computer.notes.unwrap_or_default(),
        attributes,
        progress,
    })
}

/// Idempotent primitive: mark a step complete. Returns false if it
/// already was.
async fn add_completed_step<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
    step_id: i64,
) -> Result<bool> {
    let existing = ComputerStep::find_by_id((computer_id, step_id))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let link = computer_step::ActiveModel {
        computer_id: Set(computer_id),
        step_id: Set(step_id),
    };
    link.insert(conn).await?;
    Ok(true)
}

/// Idempotent primitive: clear a completion marker. Returns false if it
/// was not set.
async fn remove_completed_step<C: ConnectionTrait>(
    conn: &C,
    computer_id: i64,
    step_id: i64,
) -> Result<bool> {
    let existing = ComputerStep::find_by_id((computer_id, step_id))
        .one(conn)
        .await?;
    if existing.is_none() {
        return Ok(false);
    }

    ComputerStep::delete_by_id((computer_id, step_id))
        .exec(conn)
        .await?;
    Ok(true)
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, DEADLINE_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| {
            AppError::Validation(format!(
                "Invalid deadline '{}', expected format YYYY-MM-DD HH:MM",
                raw
            ))
        })
}
