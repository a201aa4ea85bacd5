//! Integration tests for the workout and weight repositories.
//!
//! Requires Docker to be available on the system.

mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{test_user, TestDatabase};
use fitlog_core::{Exercise, ExerciseSet, SkipLimit, Weight, WeightUnit, WeightUpdate, Workout};
use fitlog_repository::{
    MySqlUserRepository, MySqlWeightRepository, MySqlWorkoutRepository, UserRepository, WeightQuery,
    WeightRepository, WorkoutRepository,
};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, d, 7, 30, 0).unwrap()
}

#[tokio::test]
async fn test_workout_round_trips_exercises() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let repo = MySqlWorkoutRepository::new(db.pool());

    let owner = test_user("squatter");
    users.save(&owner).await.expect("Failed to save user");

    let exercises = vec![
        Exercise::Strength {
            name: "Squat".to_string(),
            sets: vec![ExerciseSet { weight: 100, reps: 5 }],
        },
        Exercise::Cardio {
            name: "Row".to_string(),
            distance: 2000,
        },
    ];
    let workout = Workout::new(owner.id, day(3), 45, exercises.clone());
    repo.save(&workout).await.expect("Failed to save workout");

    let found = repo
        .find_by_id(workout.id)
        .await
        .expect("Query failed")
        .expect("Workout not found");
    assert_eq!(found.user_id, owner.id);
    assert_eq!(found.length, 45);
    assert_eq!(found.exercises, exercises);
}

#[tokio::test]
async fn test_workouts_listed_newest_first() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let repo = MySqlWorkoutRepository::new(db.pool());

    let owner = test_user("cyclist");
    users.save(&owner).await.expect("Failed to save user");

    let mut ids = Vec::new();
    for i in 0..3 {
        let mut workout = Workout::new(owner.id, day(1), 30, Vec::new());
        workout.created_at = day(10) + Duration::minutes(i);
        repo.save(&workout).await.expect("Failed to save workout");
        ids.push(workout.id);
    }

    let listed = repo.find_by_user(owner.id, 2).await.expect("Query failed");
    let listed_ids: Vec<_> = listed.iter().map(|w| w.id).collect();
    assert_eq!(listed_ids, vec![ids[2], ids[1]]);

    assert_eq!(repo.delete(ids[0]).await.expect("Delete failed"), 1);
}

#[tokio::test]
async fn test_weights_filtered_by_date_and_paged() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let repo = MySqlWeightRepository::new(db.pool());

    let owner = test_user("weigher");
    users.save(&owner).await.expect("Failed to save user");

    for d in [1, 4, 8, 12, 20] {
        repo.save(&Weight::new(owner.id, day(d), WeightUnit::Met, 80))
            .await
            .expect("Failed to save entry");
    }

    let listed = repo
        .find_by_user(&WeightQuery {
            user_id: owner.id,
            date_start: Some(day(4)),
            date_end: Some(day(12)),
            window: SkipLimit::new(1, 20),
        })
        .await
        .expect("Query failed");
    let dates: Vec<_> = listed.iter().map(|w| w.date).collect();
    assert_eq!(dates, vec![day(8), day(4)]);
}

#[tokio::test]
async fn test_weight_partial_update() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let repo = MySqlWeightRepository::new(db.pool());

    let owner = test_user("cutter");
    users.save(&owner).await.expect("Failed to save user");

    let entry = Weight::new(owner.id, day(2), WeightUnit::Imp, 180);
    repo.save(&entry).await.expect("Failed to save entry");

    let updated = repo
        .update(
            entry.id,
            WeightUpdate {
                weight: Some(176),
                ..WeightUpdate::default()
            },
        )
        .await
        .expect("Update failed")
        .expect("Entry not found");

    assert_eq!(updated.weight, 176);
    assert_eq!(updated.unit, WeightUnit::Imp);
    assert_eq!(updated.date, day(2));
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let weights = MySqlWeightRepository::new(db.pool());

    let owner = test_user("leaver");
    users.save(&owner).await.expect("Failed to save user");
    let entry = Weight::new(owner.id, day(5), WeightUnit::Met, 70);
    weights.save(&entry).await.expect("Failed to save entry");

    users.delete(owner.id).await.expect("Delete failed");
    assert!(weights.find_by_id(entry.id).await.expect("Query failed").is_none());
}
