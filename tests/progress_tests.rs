//! Progress engine integration tests
//!
//! Covers:
//! - Zero counts and empty lists for computers without a profile
//! - The completed/remaining/total invariant across operations
//! - Lazy template reconciliation: template edits show up at the next
//!   progress read, and a removed template step leaves its completion
//!   marker dangling

use config_matrix::services::computers::{get_computer_progress, toggle_step};
use config_matrix::services::profiles::{add_step_to_profile, remove_step_from_profile};

mod common;
use common::{
    create_test_computer, create_test_db, create_test_profile_with_steps, create_test_step,
};

#[tokio::test]
async fn test_no_profile_means_zero_progress() {
    let db = create_test_db().await;
    let computer = create_test_computer(&db, "C1", None).await;

    let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
    assert_eq!(progress.completed_count, 0);
    assert_eq!(progress.remaining_count, 0);
    assert_eq!(progress.total_count, 0);
    assert!(progress.completed.is_empty());
    assert!(progress.remaining.is_empty());
}

#[tokio::test]
async fn test_dev_profile_scenario() {
    let db = create_test_db().await;
    let (profile, _) =
        create_test_profile_with_steps(&db, "Dev", &["Install Git", "Install VSCode"]).await;
    let computer = create_test_computer(&db, "C1", Some(profile.id)).await;

    toggle_step(&db, computer.id, "Install Git").await.unwrap();

    let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
    assert_eq!(progress.completed_count, 1);
    assert_eq!(progress.remaining_count, 1);
    assert_eq!(progress.total_count, 2);
    assert_eq!(progress.completed[0].name, "Install Git");
    assert_eq!(progress.remaining[0].name, "Install VSCode");
}

#[tokio::test]
async fn test_counts_add_up_through_toggles() {
    let db = create_test_db().await;
    let (profile, _) =
        create_test_profile_with_steps(&db, "Dev", &["A", "B", "C"]).await;
    let computer = create_test_computer(&db, "C1", Some(profile.id)).await;

    for step_name in ["A", "B", "A", "C"] {
        toggle_step(&db, computer.id, step_name).await.unwrap();

        let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
        assert_eq!(
            progress.completed_count + progress.remaining_count,
            progress.total_count
        );
    }

    // A toggled twice: only B and C remain complete
    let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
    assert_eq!(progress.completed_count, 2);
    assert_eq!(progress.remaining_count, 1);
}

#[tokio::test]
async fn test_template_addition_shows_as_remaining() {
    let db = create_test_db().await;
    let (profile, _) = create_test_profile_with_steps(&db, "Dev", &["Install Git"]).await;
    let computer = create_test_computer(&db, "C1", Some(profile.id)).await;
    let new_step = create_test_step(&db, "Join domain", None).await;

    add_step_to_profile(&db, profile.id, new_step.id).await.unwrap();

    let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
    assert_eq!(progress.remaining_count, 2);
    assert!(progress.remaining.iter().any(|s| s.name == "Join domain"));
}

#[tokio::test]
async fn test_template_removal_leaves_completion_dangling() {
    let db = create_test_db().await;
    let (profile, steps) =
        create_test_profile_with_steps(&db, "Dev", &["Install Git", "Install VSCode"]).await;
    let computer = create_test_computer(&db, "C1", Some(profile.id)).await;
    toggle_step(&db, computer.id, "Install Git").await.unwrap();

    remove_step_from_profile(&db, profile.id, steps[0].id)
        .await
        .unwrap();

    // the completion marker stays in the computer's set, so it still counts
    let progress = get_computer_progress(&db, computer.id).await.unwrap().payload;
    assert_eq!(progress.completed_count, 1);
    assert_eq!(progress.remaining_count, 1);
    assert_eq!(progress.total_count, 2);
    assert!(progress.completed.iter().any(|s| s.name == "Install Git"));
}
