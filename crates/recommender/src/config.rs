//! Fixed configuration tables: exercise-characteristic keyword lists,
//! muscle-group dimensions and the hand-authored allow-lists used by the
//! context adjustments.

/// Exercise characteristic categories, matched case-insensitively as
/// substrings of the exercise name. Order defines the embedding layout.
pub const EXERCISE_CATEGORIES: &[(&str, &[&str])] = &[
    ("compound", &["squat", "deadlift", "bench", "press", "row", "pull"]),
    ("isolation", &["curl", "extension", "fly", "raise"]),
    ("upper_body", &["bench", "press", "curl", "row", "pull", "fly"]),
    ("lower_body", &["squat", "deadlift", "lunge", "press"]),
    ("push", &["bench", "press", "extension", "fly"]),
    ("pull", &["row", "curl", "pull", "lat"]),
];

/// One-hot muscle-group dimensions appended to the category flags. Order
/// defines the embedding layout.
pub const MUSCLE_GROUP_DIMENSIONS: [&str; 6] =
    ["Back", "Chest", "Shoulders", "Arms", "Legs", "Recovery"];

pub const EMBEDDING_DIM: usize = EXERCISE_CATEGORIES.len() + MUSCLE_GROUP_DIMENSIONS.len();

/// Exercises boosted when the recovery status calls for rest.
pub const LIGHT_EXERCISES: [&str; 3] = ["Calf Raises", "Lateral Raises", "Facepulls"];

/// Exercises boosted when the recovery status calls for a light workout.
pub const MODERATE_EXERCISES: [&str; 3] = ["Arnold Press", "Cable Rows", "Leg Press"];

/// Recommended instead of exercises when rest is needed.
pub const REST_DAY_ACTIVITIES: [&str; 3] = ["Rest Day", "Light Stretching", "Walking"];

/// Recommended instead of exercises for a light-workout day.
pub const LIGHT_WORKOUT_ACTIVITIES: [&str; 4] =
    ["Calf Raises", "Lateral Raises", "Facepulls", "Light Cardio"];

/// Muscle groups that balance the given group for the next session.
#[must_use]
pub fn opposite_muscle_groups(muscle_group: &str) -> &'static [&'static str] {
    match muscle_group {
        "Chest" => &["Back", "Legs"],
        "Back" => &["Chest", "Legs"],
        "Legs" => &["Chest", "Back", "Shoulders"],
        "Shoulders" => &["Legs", "Back"],
        "Arms" => &["Legs", "Chest"],
        "Biceps" => &["Triceps", "Legs"],
        "Triceps" => &["Biceps", "Legs"],
        _ => &[],
    }
}
