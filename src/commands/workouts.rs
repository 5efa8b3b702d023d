use chrono::NaiveDateTime;
use tracing::info;

use super::CommandError;
use crate::db::AppState;
use crate::models::{NewWorkout, Workout, WorkoutSet};
use crate::store;

/// Log a workout with its sets
pub async fn log_workout(
  state: &AppState,
  user_id: i64,
  workout: NewWorkout,
) -> Result<Workout, CommandError> {
  Ok(store::create_workout(&state.db, user_id, &workout).await?)
}

/// All workouts for a user, newest first
pub async fn get_workouts(state: &AppState, user_id: i64) -> Result<Vec<Workout>, CommandError> {
  Ok(store::list_workouts(&state.db, user_id).await?)
}

/// Workouts dated within `[start, end]`, newest first
pub async fn get_workouts_between(
  state: &AppState,
  user_id: i64,
  start: NaiveDateTime,
  end: NaiveDateTime,
) -> Result<Vec<Workout>, CommandError> {
  Ok(store::list_workouts_between(&state.db, user_id, start, end).await?)
}

pub async fn get_workout_sets(
  state: &AppState,
  workout_id: i64,
) -> Result<Vec<WorkoutSet>, CommandError> {
  Ok(store::get_workout_sets(&state.db, workout_id).await?)
}

pub async fn remove_workout(
  state: &AppState,
  user_id: i64,
  workout_id: i64,
) -> Result<(), CommandError> {
  store::delete_workout(&state.db, workout_id, user_id).await?;
  info!("Workout {} removed", workout_id);
  Ok(())
}
