//! Test helpers and utilities for unit and integration testing.
//!
//! This module provides common utilities for setting up test environments,
//! creating fixture data, and testing database operations.

#![allow(dead_code)]

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use config_matrix::migrations::Migrator;

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Use simple in-memory SQLite - each connection gets its own database
    let db_url = "sqlite::memory:";

    let db = Database::connect(db_url)
        .await
        .expect("Failed to create test database");

    // Run migrations using the Migrator
    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Create a test technician and return the model
pub async fn create_test_technician(
    db: &DatabaseConnection,
    name: &str,
    password: &str,
) -> config_matrix::models::technician::Model {
    use config_matrix::models::technician;
    use config_matrix::services::security::hash_password;
    use sea_orm::{ActiveModelTrait, Set};

    let hashed = hash_password(password).unwrap();

    let new_technician = technician::ActiveModel {
        name: Set(name.to_string()),
        hashed_password: Set(hashed),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_technician.insert(db).await.unwrap()
}

/// Create a test setup step and return the model
pub async fn create_test_step(
    db: &DatabaseConnection,
    name: &str,
    download_link: Option<&str>,
) -> config_matrix::models::setup_step::Model {
    use config_matrix::models::setup_step;
    use sea_orm::{ActiveModelTrait, Set};

    let new_step = setup_step::ActiveModel {
        name: Set(name.to_string()),
        download_link: Set(download_link.map(str::to_string)),
        ..Default::default()
    };

    new_step.insert(db).await.unwrap()
}

/// Create a test profile and return the model
pub async fn create_test_profile(
    db: &DatabaseConnection,
    name: &str,
) -> config_matrix::models::profile::Model {
    use config_matrix::models::profile;
    use sea_orm::{ActiveModelTrait, Set};

    let new_profile = profile::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    new_profile.insert(db).await.unwrap()
}

/// Create a profile with a template of freshly created steps
pub async fn create_test_profile_with_steps(
    db: &DatabaseConnection,
    name: &str,
    step_names: &[&str],
) -> (
    config_matrix::models::profile::Model,
    Vec<config_matrix::models::setup_step::Model>,
) {
    use config_matrix::models::profile_step;
    use sea_orm::{ActiveModelTrait, Set};

    let profile = create_test_profile(db, name).await;

    let mut steps = Vec::new();
    for step_name in step_names {
        let step = create_test_step(db, step_name, None).await;
        let link = profile_step::ActiveModel {
            profile_id: Set(profile.id),
            step_id: Set(step.id),
        };
        link.insert(db).await.unwrap();
        steps.push(step);
    }

    (profile, steps)
}

/// Create a test computer, optionally on a profile
pub async fn create_test_computer(
    db: &DatabaseConnection,
    name: &str,
    profile_id: Option<i64>,
) -> config_matrix::models::computer::Model {
    use config_matrix::models::computer;
    use sea_orm::{ActiveModelTrait, Set};

    let new_computer = computer::ActiveModel {
        name: Set(name.to_string()),
        deadline: Set(None),
        notes: Set(None),
        profile_id: Set(profile_id),
        ..Default::default()
    };

    new_computer.insert(db).await.unwrap()
}

/// Attach a preset attribute to a profile
pub async fn add_profile_attribute(
    db: &DatabaseConnection,
    profile_id: i64,
    key: &str,
    value: &str,
) {
    use config_matrix::models::profile_attribute;
    use sea_orm::{ActiveModelTrait, Set};

    let attr = profile_attribute::ActiveModel {
        profile_id: Set(profile_id),
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        ..Default::default()
    };
    attr.insert(db).await.unwrap();
}
