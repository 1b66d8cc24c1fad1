use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::technician;
use crate::response::Reply;
use crate::schemas::{CreateTechnician, TechnicianInfo};
use crate::services::security::{hash_password, verify_password};

/// Register a technician. The password is bcrypt-hashed before it touches
/// the store.
pub async fn create_technician(
    db: &DatabaseConnection,
    data: CreateTechnician,
) -> Result<Reply<TechnicianInfo>> {
    data.validate()?;

    let txn = db.begin().await?;

    let existing = Technician::find()
        .filter(technician::Column::Name.eq(&data.name))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Technician '{}' already exists",
            data.name
        )));
    }

    let hashed = hash_password(&data.password)?;

    let new_technician = technician::ActiveModel {
        name: Set(data.name),
        hashed_password: Set(hashed),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_technician.insert(&txn).await?;

    txn.commit().await?;

    tracing::info!(technician = %created.name, "technician created");
    Ok(Reply::new(
        format!("Technician '{}' was created", created.name),
        TechnicianInfo::from(created),
    ))
}

/// Check a name/password pair against the store (sign-in check).
pub async fn verify_credentials(
    db: &DatabaseConnection,
    name: &str,
    password: &str,
) -> Result<Reply<TechnicianInfo>> {
    let technician = Technician::find()
        .filter(technician::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Technician '{}' does not exist", name)))?;

    if !verify_password(password, &technician.hashed_password) {
        tracing::debug!(technician = %name, "sign-in rejected");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok(Reply::new(
        "Sign in successful",
        TechnicianInfo::from(technician),
    ))
}

/// List all technicians. Payload never carries password hashes.
pub async fn list_technicians(db: &DatabaseConnection) -> Result<Reply<Vec<TechnicianInfo>>> {
    let technicians = Technician::find().all(db).await?;

    let message = if technicians.is_empty() {
        "No technicians have been created yet"
    } else {
        "Technicians retrieved successfully"
    };

    Ok(Reply::new(
        message,
        technicians.into_iter().map(TechnicianInfo::from).collect(),
    ))
}
