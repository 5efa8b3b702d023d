use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub user_id: i64,
  pub date: NaiveDateTime,
  pub duration_minutes: Option<i64>,
  pub notes: Option<String>,
  pub created_at: Option<NaiveDateTime>,
}

/// For inserting new workouts (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
  pub date: NaiveDateTime,
  pub duration_minutes: Option<i64>,
  pub notes: Option<String>,
  pub sets: Vec<NewWorkoutSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSet {
  pub id: i64,
  pub workout_id: i64,
  pub exercise_id: i64,
  pub set_number: i64,
  pub weight: f64,
  pub reps: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutSet {
  pub exercise_id: i64,
  pub set_number: i64,
  pub weight: f64,
  pub reps: i64,
}

/// One logged set flattened with its exercise and session.
///
/// This is the read projection the record engine consumes: the workout
/// timestamp identifies the session, the exercise id identifies the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetRecord {
  pub exercise_id: i64,
  pub exercise_name: String,
  pub weight: f64,
  pub reps: i64,
  pub workout_id: i64,
  pub performed_at: NaiveDateTime,
}
