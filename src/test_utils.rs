//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed helpers for users and workouts
//! - Set history factories
//! - Helper assertions

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;

use crate::models::{NewWorkout, NewWorkoutSet, SetRecord};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a user and return its id
pub async fn seed_test_user(pool: &SqlitePool, username: &str) -> i64 {
  crate::store::create_user(pool, username)
    .await
    .expect("Failed to seed test user")
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Session timestamp on 2024-03-`day` at `hour`:00
pub fn session_at(day: u32, hour: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2024, 3, day)
    .and_then(|d| d.and_hms_opt(hour, 0, 0))
    .expect("Invalid test timestamp")
}

pub fn mock_set_record(
  exercise_id: i64,
  exercise_name: &str,
  weight: f64,
  reps: i64,
  workout_id: i64,
  performed_at: NaiveDateTime,
) -> SetRecord {
  SetRecord {
    exercise_id,
    exercise_name: exercise_name.to_string(),
    weight,
    reps,
    workout_id,
    performed_at,
  }
}

/// Workout request from (exercise_id, weight, reps) tuples, numbered in order
pub fn new_workout(date: NaiveDateTime, sets: &[(i64, f64, i64)]) -> NewWorkout {
  NewWorkout {
    date,
    duration_minutes: Some(60),
    notes: None,
    sets: sets
      .iter()
      .enumerate()
      .map(|(i, &(exercise_id, weight, reps))| NewWorkoutSet {
        exercise_id,
        set_number: i as i64 + 1,
        weight,
        reps,
      })
      .collect(),
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users', 'exercises', 'workouts', 'workout_sets')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_user_returns_distinct_ids() {
    let pool = setup_test_db().await;

    let first = seed_test_user(&pool, "alice").await;
    let second = seed_test_user(&pool, "bob").await;
    assert_ne!(first, second);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_new_workout_numbers_sets() {
    let workout = new_workout(session_at(1, 10), &[(1, 100.0, 5), (2, 60.0, 8)]);
    let numbers: Vec<i64> = workout.sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(workout.sets[1].exercise_id, 2);
  }

  #[test]
  fn test_session_at_is_on_requested_day() {
    let ts = session_at(9, 18);
    assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-03-09 18:00");
  }
}
