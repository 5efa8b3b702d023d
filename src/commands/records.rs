//! Personal record queries over a user's stored history

use tracing::{info, warn};

use super::CommandError;
use crate::db::AppState;
use crate::history::exercise_history;
use crate::models::{ExerciseHistoryEntry, PersonalRecord};
use crate::records::compute_personal_records;
use crate::store::load_user_sets;

/// Personal records for every exercise the user has logged
pub async fn get_personal_records(
    state: &AppState,
    user_id: i64,
) -> Result<Vec<PersonalRecord>, CommandError> {
    let sets = load_user_sets(&state.db, user_id).await?;

    let records = compute_personal_records(&sets).inspect_err(|e| {
        warn!("Rejected set history for user {}: {}", user_id, e);
    })?;

    info!(
        "Computed {} personal records for user {}",
        records.len(),
        user_id
    );
    Ok(records)
}

/// Session-by-session progression of one exercise
pub async fn get_exercise_history(
    state: &AppState,
    user_id: i64,
    exercise_id: i64,
) -> Result<Vec<ExerciseHistoryEntry>, CommandError> {
    let sets = load_user_sets(&state.db, user_id).await?;
    Ok(exercise_history(&sets, exercise_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_workout;
    use crate::test_utils::{new_workout, seed_test_user, session_at, setup_test_db, teardown_test_db};

    #[tokio::test]
    async fn test_personal_records_from_stored_history() {
        let pool = setup_test_db().await;
        let user = seed_test_user(&pool, "alice").await;

        create_workout(
            &pool,
            user,
            &new_workout(session_at(1, 10), &[(1, 100.0, 5), (1, 100.0, 5), (2, 60.0, 10)]),
        )
        .await
        .unwrap();
        create_workout(
            &pool,
            user,
            &new_workout(session_at(2, 10), &[(1, 120.0, 3), (2, 80.0, 3)]),
        )
        .await
        .unwrap();

        let state = AppState::new(pool);
        let records = get_personal_records(&state, user).await.expect("Should compute");
        assert_eq!(records.len(), 2);

        let squat = records.iter().find(|r| r.exercise_name == "Squat").unwrap();
        assert_eq!(squat.max_weight, Some(120.0));
        assert_eq!(squat.max_weight_reps, Some(3));
        assert_eq!(squat.max_weight_date.as_deref(), Some("2024-03-02"));
        assert_eq!(squat.max_volume, Some(1000.0));
        assert_eq!(squat.max_volume_date.as_deref(), Some("2024-03-01"));
        assert_eq!(squat.max_volume_sets.len(), 2);

        let bench = records.iter().find(|r| r.exercise_name == "Bench Press").unwrap();
        assert_eq!(bench.max_weight, Some(80.0));
        assert_eq!(bench.max_volume, Some(600.0));

        teardown_test_db(state.db).await;
    }

    #[tokio::test]
    async fn test_personal_records_empty_for_new_user() {
        let pool = setup_test_db().await;
        let user = seed_test_user(&pool, "alice").await;
        let state = AppState::new(pool);

        let records = get_personal_records(&state, user).await.unwrap();
        assert!(records.is_empty());

        teardown_test_db(state.db).await;
    }

    #[tokio::test]
    async fn test_malformed_stored_set_fails_query() {
        let pool = setup_test_db().await;
        let user = seed_test_user(&pool, "alice").await;

        create_workout(
            &pool,
            user,
            &new_workout(session_at(1, 10), &[(1, 100.0, 5), (2, -10.0, 5)]),
        )
        .await
        .unwrap();

        let state = AppState::new(pool);
        let result = get_personal_records(&state, user).await;
        assert!(matches!(result, Err(CommandError::Records(_))));

        teardown_test_db(state.db).await;
    }

    #[tokio::test]
    async fn test_exercise_history_from_stored_history() {
        let pool = setup_test_db().await;
        let user = seed_test_user(&pool, "alice").await;

        for (day, weight) in [(5, 105.0), (1, 100.0)] {
            create_workout(&pool, user, &new_workout(session_at(day, 10), &[(1, weight, 5)]))
                .await
                .unwrap();
        }

        let state = AppState::new(pool);
        let history = get_exercise_history(&state, user, 1).await.unwrap();

        let weights: Vec<f64> = history.iter().map(|e| e.max_weight).collect();
        assert_eq!(weights, vec![100.0, 105.0]);
        assert_eq!(history[1].volume_sets, vec!["105.0×5"]);

        teardown_test_db(state.db).await;
    }
}
