pub mod exercise;
pub mod records;
pub mod workout;

pub use exercise::{Exercise, ExerciseUpdate, NewExercise};
pub use records::{ExerciseHistoryEntry, PersonalRecord, VolumeSetInfo};
pub use workout::{NewWorkout, NewWorkoutSet, SetRecord, Workout, WorkoutSet};
