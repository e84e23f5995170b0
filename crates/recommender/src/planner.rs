//! Complete workout plan generation: exercise selection from historical
//! profiles plus per-exercise sets, reps, weight, rest and RPE targets.

use chrono::NaiveDate;
use liftlog_domain::{
    ExerciseProfile, NormalizedEntry, RECENT_WINDOW, RecoveryStatus, build_profiles,
    recovery_status,
};
use serde::Serialize;

#[derive(
    strum::Display, strum::EnumString, strum::EnumIter, Serialize, Debug, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Balanced,
    UpperBody,
    LowerBody,
    Push,
    Pull,
    Cardio,
}

struct WorkoutTemplate {
    muscle_groups: &'static [&'static str],
    exercises_per_group: usize,
    total_exercises: usize,
    sets_per_exercise: u32,
    rest_seconds: u32,
}

fn template(workout_type: WorkoutType) -> WorkoutTemplate {
    match workout_type {
        WorkoutType::Balanced => WorkoutTemplate {
            muscle_groups: &["Chest", "Back", "Legs", "Shoulders", "Arms"],
            exercises_per_group: 1,
            total_exercises: 5,
            sets_per_exercise: 3,
            rest_seconds: 90,
        },
        WorkoutType::UpperBody => WorkoutTemplate {
            muscle_groups: &["Chest", "Back", "Shoulders", "Arms"],
            exercises_per_group: 2,
            total_exercises: 8,
            sets_per_exercise: 3,
            rest_seconds: 90,
        },
        WorkoutType::LowerBody => WorkoutTemplate {
            muscle_groups: &["Legs", "Glutes", "Hamstrings", "Quads"],
            exercises_per_group: 2,
            total_exercises: 8,
            sets_per_exercise: 3,
            rest_seconds: 120,
        },
        WorkoutType::Push => WorkoutTemplate {
            muscle_groups: &["Chest", "Shoulders", "Triceps"],
            exercises_per_group: 2,
            total_exercises: 6,
            sets_per_exercise: 3,
            rest_seconds: 90,
        },
        WorkoutType::Pull => WorkoutTemplate {
            muscle_groups: &["Back", "Biceps", "Rear Delts"],
            exercises_per_group: 2,
            total_exercises: 6,
            sets_per_exercise: 3,
            rest_seconds: 90,
        },
        WorkoutType::Cardio => WorkoutTemplate {
            muscle_groups: &["Legs", "Cardio"],
            exercises_per_group: 1,
            total_exercises: 4,
            sets_per_exercise: 1,
            rest_seconds: 30,
        },
    }
}

/// Shortens or extends the template for the requested session length.
fn adjust_for_duration(mut template: WorkoutTemplate, duration_minutes: u32) -> WorkoutTemplate {
    if duration_minutes < 45 {
        template.total_exercises = template.total_exercises.saturating_sub(2).max(3);
        template.sets_per_exercise = (template.sets_per_exercise - 1).max(2);
    } else if duration_minutes > 90 {
        template.total_exercises += 2;
        template.sets_per_exercise += 1;
    }

    template
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub exercise: String,
    pub muscle_group: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
    pub rest_seconds: u32,
    pub rpe_target: f32,
    pub notes: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub workout_type: WorkoutType,
    pub estimated_duration_minutes: u32,
    pub total_volume: f32,
    pub exercises: Vec<PlannedExercise>,
    pub tips: Vec<String>,
}

struct PlannerContext {
    days_since_last: i64,
    recovery_status: RecoveryStatus,
}

impl PlannerContext {
    fn from_entries(entries: &[NormalizedEntry], today: NaiveDate) -> Self {
        let recent = &entries[entries.len().saturating_sub(RECENT_WINDOW)..];

        Self {
            days_since_last: recent
                .last()
                .map_or(7, |entry| (today - entry.date()).num_days()),
            recovery_status: recovery_status(recent),
        }
    }
}

/// Generates a complete workout for the given type and duration from the
/// user's training history.
#[must_use]
pub fn plan_workout(
    entries: &[NormalizedEntry],
    workout_type: WorkoutType,
    duration_minutes: u32,
    today: NaiveDate,
) -> WorkoutPlan {
    log::debug!("planning {workout_type} workout for {duration_minutes} minutes");

    let mut sorted = entries.to_vec();
    sorted.sort_by_key(NormalizedEntry::date);

    let profiles = build_profiles(&sorted);
    let structure = adjust_for_duration(template(workout_type), duration_minutes);
    let context = PlannerContext::from_entries(&sorted, today);

    let selected = select_exercises(&profiles, &structure);
    let exercises = selected
        .iter()
        .map(|profile| plan_exercise(profile, &context))
        .collect::<Vec<_>>();

    let total_volume = exercises
        .iter()
        .map(|exercise| set_volume(exercise))
        .sum::<f32>();
    let duration_seconds = exercises
        .iter()
        .map(|exercise| exercise.sets * exercise.reps * 3 + exercise.sets * exercise.rest_seconds)
        .sum::<u32>();

    WorkoutPlan {
        workout_type,
        estimated_duration_minutes: duration_seconds / 60,
        total_volume,
        exercises,
        tips: workout_tips(workout_type, &context),
    }
}

#[allow(clippy::cast_precision_loss)]
fn set_volume(exercise: &PlannedExercise) -> f32 {
    exercise.sets as f32 * exercise.reps as f32 * exercise.weight
}

/// Fills each target muscle group's quota with its most frequent, most
/// recent exercises, then tops up remaining slots with the globally most
/// frequent unused ones.
fn select_exercises<'a>(
    profiles: &'a [ExerciseProfile],
    structure: &WorkoutTemplate,
) -> Vec<&'a ExerciseProfile> {
    let mut selected: Vec<&ExerciseProfile> = Vec::new();

    for muscle_group in structure.muscle_groups {
        let mut candidates = profiles
            .iter()
            .filter(|profile| profile.muscle_group == *muscle_group)
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then(b.last_performed.cmp(&a.last_performed))
        });

        for candidate in candidates.into_iter().take(structure.exercises_per_group) {
            if selected.len() < structure.total_exercises {
                selected.push(candidate);
            }
        }
    }

    let mut remaining = profiles
        .iter()
        .filter(|profile| !selected.iter().any(|s| s.exercise == profile.exercise))
        .collect::<Vec<_>>();
    remaining.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for profile in remaining {
        if selected.len() == structure.total_exercises {
            break;
        }
        selected.push(profile);
    }

    selected
}

fn plan_exercise(profile: &ExerciseProfile, context: &PlannerContext) -> PlannedExercise {
    let intensity = intensity_multiplier(context);

    PlannedExercise {
        exercise: profile.exercise.clone(),
        muscle_group: profile.muscle_group.clone(),
        sets: calculate_sets(profile, context),
        reps: calculate_reps(profile, context),
        weight: calculate_weight(profile, intensity),
        rest_seconds: calculate_rest(profile, context),
        rpe_target: rpe_target(context),
        notes: exercise_notes(profile, context),
    }
}

fn intensity_multiplier(context: &PlannerContext) -> f32 {
    match context.recovery_status {
        RecoveryStatus::NeedsRest => 0.7,
        RecoveryStatus::LightWorkout => 0.85,
        RecoveryStatus::Ready if context.days_since_last > 3 => 1.1,
        RecoveryStatus::Ready => 1.0,
    }
}

fn calculate_sets(profile: &ExerciseProfile, context: &PlannerContext) -> u32 {
    let mut sets = 3;

    if profile.frequency > 10 {
        sets += 1;
    }

    match context.recovery_status {
        RecoveryStatus::NeedsRest => (sets - 1).max(2),
        RecoveryStatus::LightWorkout | RecoveryStatus::Ready => sets.max(2),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn calculate_reps(profile: &ExerciseProfile, context: &PlannerContext) -> u32 {
    let avg_reps = if profile.avg_reps == 0.0 {
        10.0
    } else {
        profile.avg_reps
    };

    let name = profile.exercise.to_lowercase();
    let target = if name.contains("squat") || name.contains("deadlift") {
        avg_reps.clamp(5.0, 8.0)
    } else if name.contains("curl") || name.contains("extension") {
        avg_reps.clamp(8.0, 15.0)
    } else {
        avg_reps.clamp(6.0, 12.0)
    };

    let target = match context.recovery_status {
        RecoveryStatus::NeedsRest => (target + 2.0).min(15.0),
        RecoveryStatus::LightWorkout => (target + 1.0).min(12.0),
        RecoveryStatus::Ready => target,
    };

    target as u32
}

fn calculate_weight(profile: &ExerciseProfile, intensity: f32) -> f32 {
    let avg_weight = if profile.avg_weight == 0.0 {
        profile.max_weight * 0.7
    } else {
        profile.avg_weight
    };

    let target = (avg_weight * 0.8 * intensity).min(profile.max_weight * 0.9);
    let rounded = (target / 5.0).round() * 5.0;

    rounded.max(5.0)
}

fn calculate_rest(profile: &ExerciseProfile, context: &PlannerContext) -> u32 {
    let name = profile.exercise.to_lowercase();
    let base = if name.contains("squat") || name.contains("deadlift") {
        120
    } else if name.contains("curl") || name.contains("extension") {
        60
    } else {
        90
    };

    match context.recovery_status {
        RecoveryStatus::NeedsRest => base + 30,
        RecoveryStatus::LightWorkout => base + 15,
        RecoveryStatus::Ready => base,
    }
}

fn rpe_target(context: &PlannerContext) -> f32 {
    match context.recovery_status {
        RecoveryStatus::NeedsRest => 6.0,
        RecoveryStatus::LightWorkout => 7.0,
        RecoveryStatus::Ready if context.days_since_last > 3 => 8.0,
        RecoveryStatus::Ready => 7.5,
    }
}

fn exercise_notes(profile: &ExerciseProfile, context: &PlannerContext) -> String {
    let mut notes: Vec<&str> = Vec::new();

    if profile.progression_rate > 0.0 {
        notes.push("Great progression! Keep increasing weight gradually.");
    }

    if profile.frequency > 15 {
        notes.push("You're very familiar with this exercise.");
    } else if profile.frequency < 5 {
        notes.push("Consider adding this exercise more often.");
    }

    match context.recovery_status {
        RecoveryStatus::NeedsRest => notes.push("Focus on form over intensity today."),
        RecoveryStatus::LightWorkout => notes.push("Moderate intensity - listen to your body."),
        RecoveryStatus::Ready => {}
    }

    if profile.recent_rpe > 8.5 {
        notes.push("You've been pushing hard recently - good work!");
    }

    if notes.is_empty() {
        "Focus on proper form and controlled movement.".to_string()
    } else {
        notes.join(" | ")
    }
}

fn workout_tips(workout_type: WorkoutType, context: &PlannerContext) -> Vec<String> {
    let mut tips = vec![
        "Warm up for 5-10 minutes before starting".to_string(),
        "Focus on proper form over heavy weights".to_string(),
    ];

    match context.recovery_status {
        RecoveryStatus::NeedsRest => {
            tips.push("Today is a recovery day - lighter weights, higher reps".to_string());
            tips.push("Consider adding stretching or mobility work".to_string());
        }
        RecoveryStatus::LightWorkout => {
            tips.push("Moderate intensity - you're still recovering".to_string());
        }
        RecoveryStatus::Ready => {}
    }

    match workout_type {
        WorkoutType::UpperBody => {
            tips.push("Start with compound movements (bench, rows)".to_string());
            tips.push("Finish with isolation exercises (curls, extensions)".to_string());
        }
        WorkoutType::LowerBody => {
            tips.push("Start with squats or deadlifts".to_string());
            tips.push("Use longer rest periods between heavy sets".to_string());
        }
        WorkoutType::Balanced => {
            tips.push("Alternate between push and pull movements".to_string());
            tips.push("Include both compound and isolation exercises".to_string());
        }
        WorkoutType::Push | WorkoutType::Pull | WorkoutType::Cardio => {}
    }

    if context.days_since_last > 3 {
        tips.push("You're well-rested - you can push harder today".to_string());
    } else if context.days_since_last < 2 {
        tips.push("Short rest between workouts - moderate intensity".to_string());
    }

    tips
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_approx_eq::assert_approx_eq;
    use liftlog_domain::{Rpe, WorkoutEntry, normalize};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn entry(day: u32, exercise: &str, muscle_group: &str, notation: &str, rpe: u8) -> WorkoutEntry {
        WorkoutEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            exercise: exercise.to_string(),
            muscle_group: muscle_group.to_string(),
            set_notation: notation.to_string(),
            rpe: Rpe::new(rpe).unwrap(),
        }
    }

    fn sample_entries() -> Vec<NormalizedEntry> {
        normalize(&[
            entry(1, "Bench Press", "Chest", "3x10x135", 7),
            entry(2, "Barbell Rows", "Back", "3x10x115", 7),
            entry(3, "Squats", "Legs", "3x8x185", 8),
            entry(4, "Arnold Press", "Shoulders", "3x10x40", 7),
            entry(5, "Bicep Curls", "Arms", "3x12x30", 6),
            entry(6, "Bench Press", "Chest", "3x10x140", 7),
        ])
    }

    #[rstest]
    #[case("balanced", WorkoutType::Balanced)]
    #[case("upper_body", WorkoutType::UpperBody)]
    #[case("cardio", WorkoutType::Cardio)]
    fn test_workout_type_from_str(#[case] name: &str, #[case] expected: WorkoutType) {
        assert_eq!(WorkoutType::from_str(name), Ok(expected));
    }

    #[rstest]
    #[case::short(30, 3, 2)]
    #[case::standard(60, 5, 3)]
    #[case::long(120, 7, 4)]
    fn test_adjust_for_duration(
        #[case] duration: u32,
        #[case] expected_exercises: usize,
        #[case] expected_sets: u32,
    ) {
        let adjusted = adjust_for_duration(template(WorkoutType::Balanced), duration);

        assert_eq!(adjusted.total_exercises, expected_exercises);
        assert_eq!(adjusted.sets_per_exercise, expected_sets);
    }

    #[test]
    fn test_plan_covers_template_groups() {
        let plan = plan_workout(
            &sample_entries(),
            WorkoutType::Balanced,
            60,
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        );

        assert_eq!(plan.workout_type, WorkoutType::Balanced);
        assert_eq!(plan.exercises.len(), 5);
        assert_eq!(
            plan.exercises
                .iter()
                .map(|exercise| exercise.muscle_group.as_str())
                .collect::<Vec<_>>(),
            vec!["Chest", "Back", "Legs", "Shoulders", "Arms"]
        );
    }

    #[test]
    fn test_plan_summary_volume_matches_exercises() {
        let plan = plan_workout(
            &sample_entries(),
            WorkoutType::Balanced,
            60,
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        );

        let expected = plan
            .exercises
            .iter()
            .map(|e| e.sets as f32 * e.reps as f32 * e.weight)
            .sum::<f32>();

        assert_approx_eq!(plan.total_volume, expected, 1e-3);
        assert!(plan.estimated_duration_minutes > 0);
    }

    #[test]
    fn test_weight_rounded_and_floored() {
        let profiles = build_profiles(&sample_entries());
        let bench = profiles
            .iter()
            .find(|profile| profile.exercise == "Bench Press")
            .unwrap();

        let weight = calculate_weight(bench, 1.0);

        assert_approx_eq!(weight % 5.0, 0.0, 1e-6);
        assert!(weight >= 5.0);
        assert!(weight <= bench.max_weight * 0.9);
    }

    #[test]
    fn test_weight_falls_back_to_max_when_no_average() {
        let profile = ExerciseProfile {
            exercise: "Pull Ups".to_string(),
            muscle_group: "Back".to_string(),
            avg_weight: 0.0,
            max_weight: 100.0,
            avg_reps: 8.0,
            max_reps: 10,
            avg_sets: 3.0,
            recent_rpe: 7.0,
            progression_rate: 0.0,
            frequency: 3,
            last_performed: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };

        // 100 * 0.7 * 0.8 = 56, capped at 90, rounded to 55.
        assert_approx_eq!(calculate_weight(&profile, 1.0), 55.0, 1e-6);
    }

    #[rstest]
    #[case::squat_low_band("Back Squats", 30.0, 8)]
    #[case::curl_high_band("Bicep Curls", 30.0, 15)]
    #[case::default_band("Bench Press", 30.0, 12)]
    #[case::zero_defaults_to_ten("Bench Press", 0.0, 10)]
    fn test_calculate_reps_bands(
        #[case] exercise: &str,
        #[case] avg_reps: f32,
        #[case] expected: u32,
    ) {
        let profile = ExerciseProfile {
            exercise: exercise.to_string(),
            muscle_group: "Legs".to_string(),
            avg_weight: 100.0,
            max_weight: 120.0,
            avg_reps,
            max_reps: 12,
            avg_sets: 3.0,
            recent_rpe: 7.0,
            progression_rate: 0.0,
            frequency: 3,
            last_performed: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let context = PlannerContext {
            days_since_last: 1,
            recovery_status: RecoveryStatus::Ready,
        };

        assert_eq!(calculate_reps(&profile, &context), expected);
    }

    #[rstest]
    #[case(RecoveryStatus::NeedsRest, 1, 0.7, 6.0)]
    #[case(RecoveryStatus::LightWorkout, 1, 0.85, 7.0)]
    #[case(RecoveryStatus::Ready, 5, 1.1, 8.0)]
    #[case(RecoveryStatus::Ready, 1, 1.0, 7.5)]
    fn test_intensity_and_rpe_target(
        #[case] recovery_status: RecoveryStatus,
        #[case] days_since_last: i64,
        #[case] expected_intensity: f32,
        #[case] expected_rpe: f32,
    ) {
        let context = PlannerContext {
            days_since_last,
            recovery_status,
        };

        assert_approx_eq!(intensity_multiplier(&context), expected_intensity, 1e-6);
        assert_approx_eq!(rpe_target(&context), expected_rpe, 1e-6);
    }

    #[test]
    fn test_plan_under_fatigue_reduces_sets_and_adds_rest() {
        let fatigued = normalize(&[
            entry(1, "Bench Press", "Chest", "3x10x135", 9),
            entry(2, "Squats", "Legs", "3x8x185", 10),
            entry(3, "Deadlift", "Back", "1x5x225", 9),
        ]);

        let plan = plan_workout(
            &fatigued,
            WorkoutType::Balanced,
            60,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );

        for exercise in &plan.exercises {
            assert_eq!(exercise.sets, 2);
            assert_approx_eq!(exercise.rpe_target, 6.0, 1e-6);
        }
        assert!(plan
            .tips
            .iter()
            .any(|tip| tip.contains("recovery day")));
    }

    #[test]
    fn test_empty_log_plan_has_no_exercises() {
        let plan = plan_workout(
            &[],
            WorkoutType::Balanced,
            60,
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        );

        assert_eq!(plan.exercises, vec![]);
        assert_eq!(plan.total_volume, 0.0);
        assert_eq!(plan.estimated_duration_minutes, 0);
    }
}
