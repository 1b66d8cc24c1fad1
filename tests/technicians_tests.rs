//! Technician service integration tests
//!
//! Covers:
//! - Registration and duplicate-name conflict
//! - Credential verification (success, wrong password, unknown name)
//! - Listing technicians without leaking password hashes

use config_matrix::error::AppError;
use config_matrix::schemas::CreateTechnician;
use config_matrix::services::technicians::{
    create_technician, list_technicians, verify_credentials,
};

mod common;
use common::{create_test_db, create_test_technician};

#[tokio::test]
async fn test_create_technician() {
    let db = create_test_db().await;

    let reply = create_technician(
        &db,
        CreateTechnician {
            name: "alice".to_string(),
            password: "password123".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(reply.message, "Technician 'alice' was created");
    assert_eq!(reply.payload.name, "alice");
    assert!(reply.payload.id > 0);
}

#[tokio::test]
async fn test_create_technician_duplicate_name_conflicts() {
    let db = create_test_db().await;
    create_test_technician(&db, "alice", "password123").await;

    let result = create_technician(
        &db,
        CreateTechnician {
            name: "alice".to_string(),
            password: "other".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_create_technician_empty_name_is_validation_error() {
    let db = create_test_db().await;

    let result = create_technician(
        &db,
        CreateTechnician {
            name: "".to_string(),
            password: "password123".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_verify_credentials_success() {
    let db = create_test_db().await;
    create_test_technician(&db, "bob", "s3cret").await;

    let reply = verify_credentials(&db, "bob", "s3cret").await.unwrap();
    assert_eq!(reply.message, "Sign in successful");
    assert_eq!(reply.payload.name, "bob");
}

#[tokio::test]
async fn test_verify_credentials_wrong_password() {
    let db = create_test_db().await;
    create_test_technician(&db, "bob", "s3cret").await;

    let result = verify_credentials(&db, "bob", "wrong").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_verify_credentials_unknown_name() {
    let db = create_test_db().await;

    let result = verify_credentials(&db, "nobody", "whatever").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_technicians_empty() {
    let db = create_test_db().await;

    let reply = list_technicians(&db).await.unwrap();
    assert!(reply.payload.is_empty());
    assert_eq!(reply.message, "No technicians have been created yet");
}

#[tokio::test]
async fn test_list_technicians() {
    let db = create_test_db().await;
    create_test_technician(&db, "alice", "pw1").await;
    create_test_technician(&db, "bob", "pw2").await;

    let reply = list_technicians(&db).await.unwrap();
    assert_eq!(reply.payload.len(), 2);

    // payloads carry id and name only; the serialized form must not leak
    // anything password-shaped
    let json = serde_json::to_value(&reply.payload).unwrap();
    assert!(json.to_string().find("password").is_none());
    assert!(json.to_string().find("hashed").is_none());
}
