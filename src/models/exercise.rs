use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  pub muscle_group: Option<String>,
  pub is_custom: bool,
  pub user_id: Option<i64>,
}

/// Custom exercise owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
  pub user_id: i64,
  pub name: String,
  pub muscle_group: Option<String>,
}

/// Fields left as `None` keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseUpdate {
  pub name: Option<String>,
  pub muscle_group: Option<String>,
}
