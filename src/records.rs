//! Personal Record Engine
//!
//! Derives two records per exercise from a user's complete set history:
//! - max weight: heaviest set, then most reps at that weight, then most recent
//! - max volume: the session with the largest sum of weight × reps
//!
//! Key principles:
//! - Pure and synchronous, input is borrowed and never mutated
//! - One malformed set rejects the whole query (no partial records)
//! - Sessions are keyed by exact timestamp, not by calendar date
//! - Recomputed on every query, nothing here is persisted

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::models::{PersonalRecord, SetRecord, VolumeSetInfo};

/// Output pattern for every date on a record
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Invalid set for exercise {exercise_id} in workout {workout_id}: {reason}")]
    InvalidInput {
        exercise_id: i64,
        workout_id: i64,
        reason: String,
    },
}

impl RecordError {
    fn invalid(set: &SetRecord, reason: String) -> Self {
        Self::InvalidInput {
            exercise_id: set.exercise_id,
            workout_id: set.workout_id,
            reason,
        }
    }
}

/// Reject sets that cannot be ranked: non-finite or negative weight, reps < 1
pub fn validate_set(set: &SetRecord) -> Result<(), RecordError> {
    if !set.weight.is_finite() {
        return Err(RecordError::invalid(
            set,
            format!("weight is not a number ({})", set.weight),
        ));
    }
    if set.weight < 0.0 {
        return Err(RecordError::invalid(
            set,
            format!("negative weight ({})", set.weight),
        ));
    }
    if set.reps <= 0 {
        return Err(RecordError::invalid(
            set,
            format!("reps must be positive ({})", set.reps),
        ));
    }
    Ok(())
}

/// Calendar date of a session timestamp; time of day is dropped
pub fn format_date(timestamp: &NaiveDateTime) -> String {
    timestamp.date().format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
/// Grouper: one bucket per exercise
// ---------------------------------------------------------------------------

/// Partition sets by exercise id in a single pass.
///
/// Buckets keep the relative input order of their sets and are never empty.
pub fn group_by_exercise(sets: &[SetRecord]) -> BTreeMap<i64, Vec<&SetRecord>> {
    let mut buckets: BTreeMap<i64, Vec<&SetRecord>> = BTreeMap::new();
    for set in sets {
        buckets.entry(set.exercise_id).or_default().push(set);
    }
    buckets
}

// ---------------------------------------------------------------------------
/// Sessions: sets of one exercise sharing a workout timestamp
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Session<'a> {
    pub performed_at: NaiveDateTime,
    pub sets: Vec<&'a SetRecord>,
}

impl Session<'_> {
    /// Sum of weight × reps over the session's sets
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(|s| s.weight * s.reps as f64).sum()
    }

    pub fn volume_sets(&self) -> Vec<VolumeSetInfo> {
        self.sets
            .iter()
            .map(|s| VolumeSetInfo::new(s.weight, s.reps))
            .collect()
    }
}

/// Group one exercise's sets by exact session timestamp, in first-seen order
pub fn group_by_session<'a>(sets: &[&'a SetRecord]) -> Vec<Session<'a>> {
    let mut index: HashMap<NaiveDateTime, usize> = HashMap::new();
    let mut sessions: Vec<Session<'a>> = Vec::new();

    for &set in sets {
        match index.get(&set.performed_at) {
            Some(&i) => sessions[i].sets.push(set),
            None => {
                index.insert(set.performed_at, sessions.len());
                sessions.push(Session {
                    performed_at: set.performed_at,
                    sets: vec![set],
                });
            }
        }
    }

    sessions
}

// ---------------------------------------------------------------------------
/// Record Calculator
// ---------------------------------------------------------------------------

/// Ranking for the max-weight record: weight, then reps, then recency.
///
/// `Greater` means `a` is the better record. Weights must be validated first.
/// Adding `0.0` folds `-0.0` into `0.0` so equal weights reach the later keys.
pub fn compare_weight_rank(a: &SetRecord, b: &SetRecord) -> Ordering {
    (a.weight + 0.0)
        .total_cmp(&(b.weight + 0.0))
        .then_with(|| a.reps.cmp(&b.reps))
        .then_with(|| a.performed_at.cmp(&b.performed_at))
}

/// Heaviest set of a bucket under `compare_weight_rank`
pub fn best_set<'a>(sets: &[&'a SetRecord]) -> Option<&'a SetRecord> {
    sets.iter().copied().max_by(|a, b| compare_weight_rank(a, b))
}

/// Session with the largest volume. On equal volume the first session wins.
pub fn best_session<'s, 'a>(sessions: &'s [Session<'a>]) -> Option<(&'s Session<'a>, f64)> {
    let mut best: Option<(&'s Session<'a>, f64)> = None;
    for session in sessions {
        let volume = session.volume();
        match best {
            Some((_, best_volume)) if volume <= best_volume => {}
            _ => best = Some((session, volume)),
        }
    }
    best
}

/// Reduce one exercise bucket to its personal record.
///
/// An empty bucket yields a record with no fields set.
pub fn calculate_records(exercise_id: i64, sets: &[&SetRecord]) -> PersonalRecord {
    let exercise_name = sets
        .first()
        .map(|s| s.exercise_name.clone())
        .unwrap_or_default();

    let mut record = PersonalRecord {
        exercise_id,
        exercise_name,
        max_weight: None,
        max_weight_reps: None,
        max_weight_date: None,
        max_volume: None,
        max_volume_date: None,
        max_volume_sets: Vec::new(),
    };

    if let Some(set) = best_set(sets) {
        record.max_weight = Some(set.weight + 0.0);
        record.max_weight_reps = Some(set.reps);
        record.max_weight_date = Some(format_date(&set.performed_at));
    }

    let sessions = group_by_session(sets);
    if let Some((session, volume)) = best_session(&sessions) {
        record.max_volume = Some(volume);
        record.max_volume_date = Some(format_date(&session.performed_at));
        record.max_volume_sets = session.volume_sets();
    }

    record
}

/// Compute personal records for every exercise in a user's set history.
///
/// All sets are validated before any grouping happens, so a single malformed
/// set fails the query. Results are ordered by exercise id.
pub fn compute_personal_records(sets: &[SetRecord]) -> Result<Vec<PersonalRecord>, RecordError> {
    for set in sets {
        validate_set(set)?;
    }

    let buckets = group_by_exercise(sets);
    let records: Vec<PersonalRecord> = buckets
        .iter()
        .map(|(&exercise_id, bucket)| calculate_records(exercise_id, bucket))
        .filter(PersonalRecord::has_record)
        .collect();

    debug!(
        "Computed {} personal records from {} sets",
        records.len(),
        sets.len()
    );

    Ok(records)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
