use serde::{Deserialize, Serialize};

/// Best single-set weight and best session volume for one exercise.
///
/// Derived on every query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
  pub exercise_id: i64,
  pub exercise_name: String,
  pub max_weight: Option<f64>,
  pub max_weight_reps: Option<i64>,
  pub max_weight_date: Option<String>,
  pub max_volume: Option<f64>,
  pub max_volume_date: Option<String>,
  pub max_volume_sets: Vec<VolumeSetInfo>,
}

impl PersonalRecord {
  pub fn has_record(&self) -> bool {
    self.max_weight.is_some() || self.max_volume.is_some()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSetInfo {
  pub weight: f64,
  pub reps: i64,
  pub volume_contribution: f64,
}

impl VolumeSetInfo {
  pub fn new(weight: f64, reps: i64) -> Self {
    Self {
      weight,
      reps,
      volume_contribution: weight * reps as f64,
    }
  }
}

/// One session's summary in an exercise's progression timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseHistoryEntry {
  pub exercise_id: i64,
  pub date: String,
  pub max_weight: f64,
  pub max_weight_reps: i64,
  pub volume: f64,
  /// Rendered as "weight×reps"
  pub volume_sets: Vec<String>,
}
