//! SQLite-backed store for exercises, workouts and logged sets
//!
//! Plain pass-through CRUD plus the one read the record engine needs:
//! a user's full set history flattened into `SetRecord`s.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::models::{Exercise, ExerciseUpdate, NewExercise, NewWorkout, SetRecord, Workout, WorkoutSet};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("{0} not found")]
  NotFound(String),

  #[error("Not allowed: {0}")]
  Forbidden(String),

  #[error("{0} is still referenced by logged sets")]
  InUse(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// ---------------------------------------------------------------------------
/// Users
/// ---------------------------------------------------------------------------

/// Create a user and return its id
pub async fn create_user(pool: &SqlitePool, username: &str) -> StoreResult<i64> {
  let result = sqlx::query("INSERT INTO users (username) VALUES (?1)")
    .bind(username)
    .execute(pool)
    .await?;

  Ok(result.last_insert_rowid())
}

/// ---------------------------------------------------------------------------
/// Exercises
/// ---------------------------------------------------------------------------

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> StoreResult<Exercise> {
  sqlx::query_as::<_, Exercise>(
    "SELECT id, name, muscle_group, is_custom, user_id FROM exercises WHERE id = ?1",
  )
  .bind(exercise_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| StoreError::NotFound(format!("Exercise {}", exercise_id)))
}

/// Built-in exercises plus the user's own custom ones
pub async fn list_exercises(pool: &SqlitePool, user_id: i64) -> StoreResult<Vec<Exercise>> {
  let exercises = sqlx::query_as::<_, Exercise>(
    r#"
    SELECT id, name, muscle_group, is_custom, user_id
    FROM exercises
    WHERE is_custom = 0 OR user_id = ?1
    ORDER BY name
    "#,
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  Ok(exercises)
}

/// Create a custom exercise for a user
pub async fn create_exercise(pool: &SqlitePool, exercise: &NewExercise) -> StoreResult<Exercise> {
  let result = sqlx::query(
    "INSERT INTO exercises (name, muscle_group, is_custom, user_id) VALUES (?1, ?2, 1, ?3)",
  )
  .bind(&exercise.name)
  .bind(&exercise.muscle_group)
  .bind(exercise.user_id)
  .execute(pool)
  .await?;

  info!("Created custom exercise '{}' for user {}", exercise.name, exercise.user_id);
  get_exercise(pool, result.last_insert_rowid()).await
}

/// Load an exercise the user is allowed to change: custom and owned by them
async fn owned_custom_exercise(
  pool: &SqlitePool,
  exercise_id: i64,
  user_id: i64,
) -> StoreResult<Exercise> {
  let exercise = get_exercise(pool, exercise_id).await?;
  if !exercise.is_custom || exercise.user_id != Some(user_id) {
    return Err(StoreError::Forbidden(format!(
      "exercise {} is not a custom exercise of user {}",
      exercise_id, user_id
    )));
  }
  Ok(exercise)
}

/// Rename or regroup a custom exercise. Built-ins and other users' exercises
/// are refused.
pub async fn update_exercise(
  pool: &SqlitePool,
  exercise_id: i64,
  user_id: i64,
  update: &ExerciseUpdate,
) -> StoreResult<Exercise> {
  let current = owned_custom_exercise(pool, exercise_id, user_id).await?;

  let name = update.name.as_ref().unwrap_or(&current.name);
  let muscle_group = update.muscle_group.as_ref().or(current.muscle_group.as_ref());

  sqlx::query("UPDATE exercises SET name = ?1, muscle_group = ?2 WHERE id = ?3")
    .bind(name)
    .bind(muscle_group)
    .bind(exercise_id)
    .execute(pool)
    .await?;

  info!("Updated exercise {} for user {}", exercise_id, user_id);
  get_exercise(pool, exercise_id).await
}

/// Delete a custom exercise owned by the user.
///
/// Logged sets are history, so an exercise that still has sets is refused
/// with `StoreError::InUse` rather than deleting or orphaning them.
pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64, user_id: i64) -> StoreResult<()> {
  owned_custom_exercise(pool, exercise_id, user_id).await?;

  let mut tx = pool.begin().await?;

  let logged: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_sets WHERE exercise_id = ?1")
    .bind(exercise_id)
    .fetch_one(&mut *tx)
    .await?;

  if logged > 0 {
    return Err(StoreError::InUse(format!("Exercise {}", exercise_id)));
  }

  sqlx::query("DELETE FROM exercises WHERE id = ?1")
    .bind(exercise_id)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;

  info!("Deleted exercise {} for user {}", exercise_id, user_id);
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Workouts
/// ---------------------------------------------------------------------------

pub async fn get_workout(pool: &SqlitePool, workout_id: i64) -> StoreResult<Workout> {
  sqlx::query_as::<_, Workout>(
    "SELECT id, user_id, date, duration_minutes, notes, created_at FROM workouts WHERE id = ?1",
  )
  .bind(workout_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| StoreError::NotFound(format!("Workout {}", workout_id)))
}

/// Workouts for a user, newest first
pub async fn list_workouts(pool: &SqlitePool, user_id: i64) -> StoreResult<Vec<Workout>> {
  let workouts = sqlx::query_as::<_, Workout>(
    r#"
    SELECT id, user_id, date, duration_minutes, notes, created_at
    FROM workouts
    WHERE user_id = ?1
    ORDER BY date DESC
    "#,
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  Ok(workouts)
}

/// Workouts dated within `[start, end]` (inclusive), newest first
pub async fn list_workouts_between(
  pool: &SqlitePool,
  user_id: i64,
  start: NaiveDateTime,
  end: NaiveDateTime,
) -> StoreResult<Vec<Workout>> {
  let workouts = sqlx::query_as::<_, Workout>(
    r#"
    SELECT id, user_id, date, duration_minutes, notes, created_at
    FROM workouts
    WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
    ORDER BY date DESC
    "#,
  )
  .bind(user_id)
  .bind(start)
  .bind(end)
  .fetch_all(pool)
  .await?;

  Ok(workouts)
}

/// Insert a workout and all of its sets in one transaction.
///
/// An unknown exercise id rolls the whole workout back.
pub async fn create_workout(
  pool: &SqlitePool,
  user_id: i64,
  workout: &NewWorkout,
) -> StoreResult<Workout> {
  let mut tx = pool.begin().await?;

  let result = sqlx::query(
    r#"
    INSERT INTO workouts (user_id, date, duration_minutes, notes)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(workout.date)
  .bind(workout.duration_minutes)
  .bind(&workout.notes)
  .execute(&mut *tx)
  .await?;

  let workout_id = result.last_insert_rowid();

  for set in &workout.sets {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM exercises WHERE id = ?1")
      .bind(set.exercise_id)
      .fetch_optional(&mut *tx)
      .await?;

    if exists.is_none() {
      return Err(StoreError::NotFound(format!("Exercise {}", set.exercise_id)));
    }

    sqlx::query(
      r#"
      INSERT INTO workout_sets (workout_id, exercise_id, set_number, weight, reps)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(workout_id)
    .bind(set.exercise_id)
    .bind(set.set_number)
    .bind(set.weight)
    .bind(set.reps)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;

  info!(
    "Logged workout {} for user {} with {} sets",
    workout_id,
    user_id,
    workout.sets.len()
  );

  get_workout(pool, workout_id).await
}

/// Sets of one workout ordered by set number
pub async fn get_workout_sets(pool: &SqlitePool, workout_id: i64) -> StoreResult<Vec<WorkoutSet>> {
  get_workout(pool, workout_id).await?;

  let sets = sqlx::query_as::<_, WorkoutSet>(
    r#"
    SELECT id, workout_id, exercise_id, set_number, weight, reps
    FROM workout_sets
    WHERE workout_id = ?1
    ORDER BY set_number
    "#,
  )
  .bind(workout_id)
  .fetch_all(pool)
  .await?;

  Ok(sets)
}

/// Delete a workout and its sets. Only the owner may delete.
pub async fn delete_workout(pool: &SqlitePool, workout_id: i64, user_id: i64) -> StoreResult<()> {
  let workout = get_workout(pool, workout_id).await?;
  if workout.user_id != user_id {
    return Err(StoreError::Forbidden(format!(
      "workout {} belongs to another user",
      workout_id
    )));
  }

  let mut tx = pool.begin().await?;

  sqlx::query("DELETE FROM workout_sets WHERE workout_id = ?1")
    .bind(workout_id)
    .execute(&mut *tx)
    .await?;

  sqlx::query("DELETE FROM workouts WHERE id = ?1")
    .bind(workout_id)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;

  info!("Deleted workout {} for user {}", workout_id, user_id);
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Set History
/// ---------------------------------------------------------------------------

/// Every set the user has logged, joined with its exercise and workout
pub async fn load_user_sets(pool: &SqlitePool, user_id: i64) -> StoreResult<Vec<SetRecord>> {
  let sets = sqlx::query_as::<_, SetRecord>(
    r#"
    SELECT
      ws.exercise_id,
      e.name AS exercise_name,
      ws.weight,
      ws.reps,
      ws.workout_id,
      w.date AS performed_at
    FROM workout_sets ws
    JOIN workouts w ON w.id = ws.workout_id
    JOIN exercises e ON e.id = ws.exercise_id
    WHERE w.user_id = ?1
    ORDER BY w.date, ws.workout_id, ws.set_number
    "#,
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  debug!("Loaded {} sets for user {}", sets.len(), user_id);
  Ok(sets)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
