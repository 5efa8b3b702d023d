//! Per-session progression of a single exercise
//!
//! Feeds the history graphs: one entry per session, oldest first, with the
//! session's best set and its total volume.

use crate::models::{ExerciseHistoryEntry, SetRecord};
use crate::records::{best_set, format_date, group_by_session, validate_set, RecordError};

/// Render a contributing set as "weight×reps".
///
/// Whole weights keep one decimal ("100.0×5"), fractional weights print in
/// full ("102.25×3").
pub fn format_volume_set(weight: f64, reps: i64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.1}×{}", weight, reps)
    } else {
        format!("{}×{}", weight, reps)
    }
}

/// Build the session timeline for one exercise.
///
/// Only the exercise's own sets are validated; a malformed one fails the
/// whole timeline. An exercise with no sets yields an empty timeline.
pub fn exercise_history(
    sets: &[SetRecord],
    exercise_id: i64,
) -> Result<Vec<ExerciseHistoryEntry>, RecordError> {
    let bucket: Vec<&SetRecord> = sets
        .iter()
        .filter(|s| s.exercise_id == exercise_id)
        .collect();

    for set in &bucket {
        validate_set(set)?;
    }

    let mut sessions = group_by_session(&bucket);
    sessions.sort_by_key(|s| s.performed_at);

    let entries = sessions
        .iter()
        .filter_map(|session| {
            let best = best_set(&session.sets)?;
            Some(ExerciseHistoryEntry {
                exercise_id,
                date: format_date(&session.performed_at),
                max_weight: best.weight,
                max_weight_reps: best.reps,
                volume: session.volume(),
                volume_sets: session
                    .sets
                    .iter()
                    .map(|s| format_volume_set(s.weight, s.reps))
                    .collect(),
            })
        })
        .collect();

    Ok(entries)
}
