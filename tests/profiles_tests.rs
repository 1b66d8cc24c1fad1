//! Profile service integration tests
//!
//! Covers:
//! - Create/list with duplicate-name conflicts
//! - Template editing: add (conflict when present), remove (not found when
//!   absent; second removal of the same pair must fail)
//! - Available-step listing
//! - Preset attribute upsert, replace-all and delete
//! - Profile deletion cascading to its computers

use std::collections::BTreeMap;

use sea_orm::EntityTrait;

use config_matrix::error::AppError;
use config_matrix::models::prelude::*;
use config_matrix::schemas::CreateProfile;
use config_matrix::services::profiles::{
    add_step_to_profile, available_steps, create_profile, delete_profile,
    delete_profile_attribute, get_profile_attributes, get_profile_steps, list_profiles,
    remove_step_from_profile, set_profile_attribute, set_profile_attributes,
};

mod common;
use common::{
    add_profile_attribute, create_test_computer, create_test_db, create_test_profile,
    create_test_profile_with_steps, create_test_step,
};

#[tokio::test]
async fn test_create_profile() {
    let db = create_test_db().await;

    let reply = create_profile(
        &db,
        CreateProfile {
            name: "Dev".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(reply.payload.name, "Dev");
    assert_eq!(reply.message, "Profile 'Dev' created successfully");
}

#[tokio::test]
async fn test_create_profile_duplicate_name_conflicts() {
    let db = create_test_db().await;
    create_test_profile(&db, "Dev").await;

    let result = create_profile(
        &db,
        CreateProfile {
            name: "Dev".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_list_profiles() {
    let db = create_test_db().await;
    create_test_profile(&db, "Dev").await;
    create_test_profile(&db, "Ops").await;

    let reply = list_profiles(&db).await.unwrap();
    assert_eq!(reply.payload.len(), 2);
}

#[tokio::test]
async fn test_add_step_to_profile_and_get_steps() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    let step = create_test_step(&db, "Install Git", None).await;

    add_step_to_profile(&db, profile.id, step.id).await.unwrap();

    let steps = get_profile_steps(&db, profile.id).await.unwrap().payload;
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].name, "Install Git");
}

#[tokio::test]
async fn test_add_step_twice_conflicts() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    let step = create_test_step(&db, "Install Git", None).await;

    add_step_to_profile(&db, profile.id, step.id).await.unwrap();
    let result = add_step_to_profile(&db, profile.id, step.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_remove_step_twice_second_not_found() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    let step = create_test_step(&db, "Install Git", None).await;
    add_step_to_profile(&db, profile.id, step.id).await.unwrap();

    remove_step_from_profile(&db, profile.id, step.id)
        .await
        .unwrap();
    let second = remove_step_from_profile(&db, profile.id, step.id).await;

    assert!(matches!(second, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_available_steps_excludes_template() {
    let db = create_test_db().await;
    let (profile, _) = create_test_profile_with_steps(&db, "Dev", &["Install Git"]).await;
    create_test_step(&db, "Install VSCode", None).await;

    let available = available_steps(&db, profile.id).await.unwrap().payload;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].name, "Install VSCode");
}

#[tokio::test]
async fn test_set_profile_attribute_upserts() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;

    set_profile_attribute(&db, profile.id, "os", "windows")
        .await
        .unwrap();
    set_profile_attribute(&db, profile.id, "os", "linux")
        .await
        .unwrap();

    let attributes = get_profile_attributes(&db, profile.id).await.unwrap().payload;
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("os").map(String::as_str), Some("linux"));
}

#[tokio::test]
async fn test_set_profile_attribute_empty_key_is_validation_error() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;

    let result = set_profile_attribute(&db, profile.id, "  ", "x").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_set_profile_attributes_replaces_all() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    add_profile_attribute(&db, profile.id, "os", "windows").await;
    add_profile_attribute(&db, profile.id, "ram", "16GB").await;

    let mut attributes = BTreeMap::new();
    attributes.insert("os".to_string(), "linux".to_string());
    attributes.insert("disk".to_string(), "1TB".to_string());

    set_profile_attributes(&db, profile.id, attributes)
        .await
        .unwrap();

    let stored = get_profile_attributes(&db, profile.id).await.unwrap().payload;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.get("os").map(String::as_str), Some("linux"));
    assert_eq!(stored.get("disk").map(String::as_str), Some("1TB"));
    assert!(stored.get("ram").is_none());
}

#[tokio::test]
async fn test_delete_profile_attribute() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    add_profile_attribute(&db, profile.id, "os", "windows").await;

    delete_profile_attribute(&db, profile.id, "os")
        .await
        .unwrap();
    let second = delete_profile_attribute(&db, profile.id, "os").await;

    assert!(matches!(second, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_profile_cascades_to_computers() {
    let db = create_test_db().await;
    let profile = create_test_profile(&db, "Dev").await;
    create_test_computer(&db, "C1", Some(profile.id)).await;
    create_test_computer(&db, "C2", Some(profile.id)).await;
    let other_profile = create_test_profile(&db, "Ops").await;
    create_test_computer(&db, "C3", Some(other_profile.id)).await;

    delete_profile(&db, "Dev").await.unwrap();

    let remaining = Computer::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "C3");

    let profiles = Profile::find().all(&db).await.unwrap();
    assert_eq!(profiles.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_profile_not_found() {
    let db = create_test_db().await;

    let result = delete_profile(&db, "Ghost").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
