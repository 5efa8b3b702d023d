pub mod records;
pub mod workouts;

use serde::Serialize;

use crate::db::AppState;
use crate::models::{Exercise, ExerciseUpdate, NewExercise};
use crate::records::RecordError;
use crate::store::{self, StoreError};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

/// Error returned by every command, serialized as its message
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Records(#[from] RecordError),
}

impl Serialize for CommandError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Exercises
/// ---------------------------------------------------------------------------

pub async fn get_exercises(state: &AppState, user_id: i64) -> Result<Vec<Exercise>, CommandError> {
  Ok(store::list_exercises(&state.db, user_id).await?)
}

pub async fn add_exercise(state: &AppState, exercise: NewExercise) -> Result<Exercise, CommandError> {
  Ok(store::create_exercise(&state.db, &exercise).await?)
}

/// Edit one of the user's custom exercises
pub async fn edit_exercise(
  state: &AppState,
  user_id: i64,
  exercise_id: i64,
  update: ExerciseUpdate,
) -> Result<Exercise, CommandError> {
  Ok(store::update_exercise(&state.db, exercise_id, user_id, &update).await?)
}

/// Delete one of the user's custom exercises that has no logged sets
pub async fn remove_exercise(
  state: &AppState,
  user_id: i64,
  exercise_id: i64,
) -> Result<(), CommandError> {
  Ok(store::delete_exercise(&state.db, exercise_id, user_id).await?)
}
