//! Hybrid combination of the collaborative and content models, plus the
//! rule-based context-aware strategy.

use liftlog_domain::{NormalizedEntry, RecoveryStatus, WorkoutContext};

use crate::{
    collaborative::CollaborativeModel,
    config::{
        LIGHT_EXERCISES, LIGHT_WORKOUT_ACTIVITIES, MODERATE_EXERCISES, REST_DAY_ACTIVITIES,
        opposite_muscle_groups,
    },
    content::ContentModel,
};

pub const COLLABORATIVE_WEIGHT: f64 = 0.6;
pub const CONTENT_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone)]
pub struct HybridModel {
    pub collaborative: CollaborativeModel,
    pub content: ContentModel,
}

impl HybridModel {
    /// Combines both source lists (of size `2k`) with a linear rank-decay
    /// score per list, applies recovery-state multipliers and returns the
    /// top `k`. Recent exercises never appear: both sources exclude them.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recommend(&self, recent: &[String], context: &WorkoutContext, k: usize) -> Vec<String> {
        let collaborative_list = self.collaborative.recommend(recent, k * 2);
        let content_list = self.content.recommend(recent, k * 2);

        let mut scores: Vec<(String, f64)> = Vec::new();

        add_rank_decay(&mut scores, &collaborative_list, COLLABORATIVE_WEIGHT);
        add_rank_decay(&mut scores, &content_list, CONTENT_WEIGHT);

        for (exercise, score) in &mut scores {
            *score *= context_multiplier(exercise, context.recovery_status);
        }

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(k)
            .map(|(exercise, _)| exercise)
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn add_rank_decay(scores: &mut Vec<(String, f64)>, list: &[String], weight: f64) {
    let len = list.len() as f64;

    for (rank, exercise) in list.iter().enumerate() {
        let contribution = weight * (1.0 - rank as f64 / len);

        match scores.iter_mut().find(|(scored, _)| scored == exercise) {
            Some((_, score)) => *score += contribution,
            None => scores.push((exercise.clone(), contribution)),
        }
    }
}

fn context_multiplier(exercise: &str, recovery_status: RecoveryStatus) -> f64 {
    match recovery_status {
        RecoveryStatus::NeedsRest if LIGHT_EXERCISES.contains(&exercise) => 1.5,
        RecoveryStatus::LightWorkout if MODERATE_EXERCISES.contains(&exercise) => 1.3,
        _ => 1.0,
    }
}

/// Rule-based recommendations from muscle balance and recovery state.
/// Returns the exercise list and the assembled reasoning.
#[must_use]
pub fn context_aware(
    entries: &[NormalizedEntry],
    context: &WorkoutContext,
    k: usize,
) -> (Vec<String>, String) {
    let mut recommendations: Vec<String> = Vec::new();
    let mut reasoning_parts: Vec<String> = Vec::new();

    match context.recovery_status {
        RecoveryStatus::NeedsRest => {
            recommendations.extend(REST_DAY_ACTIVITIES.map(String::from));
            reasoning_parts.push("High RPE trend suggests need for recovery".to_string());
        }
        RecoveryStatus::LightWorkout => {
            recommendations.extend(LIGHT_WORKOUT_ACTIVITIES.map(String::from));
            reasoning_parts
                .push("Moderate recovery needed - light exercises recommended".to_string());
        }
        RecoveryStatus::Ready => {
            if let Some(weakest) = weakest_muscle_group(entries) {
                recommendations.extend(exercises_for_muscle_group(entries, &weakest));
                reasoning_parts
                    .push(format!("{weakest} is undertrained - focusing on {weakest} exercises"));
            }

            if let Some(last_muscle_group) = context
                .last_muscle_group
                .as_deref()
                .filter(|group| *group != "Recovery")
            {
                let additional = opposite_muscle_groups(last_muscle_group)
                    .iter()
                    .flat_map(|group| exercises_for_muscle_group(entries, group))
                    .take(3)
                    .collect::<Vec<_>>();

                if !additional.is_empty() {
                    recommendations.extend(additional);
                    reasoning_parts.push(format!(
                        "Last workout was {last_muscle_group} - focusing on different muscle groups"
                    ));
                }
            }
        }
    }

    let mut deduplicated: Vec<String> = Vec::new();
    for recommendation in recommendations {
        if !deduplicated.contains(&recommendation) {
            deduplicated.push(recommendation);
        }
        if deduplicated.len() == k {
            break;
        }
    }

    (deduplicated, reasoning_parts.join(" | "))
}

/// The muscle group with the lowest total volume, Recovery excluded. Ties
/// go to the alphabetically first group. None when the log has no volume.
#[must_use]
pub fn weakest_muscle_group(entries: &[NormalizedEntry]) -> Option<String> {
    let mut volume_by_group: std::collections::BTreeMap<&str, f32> =
        std::collections::BTreeMap::new();

    for entry in entries {
        *volume_by_group.entry(entry.muscle_group()).or_insert(0.0) += entry.total_volume;
    }

    if volume_by_group.values().sum::<f32>() == 0.0 {
        return None;
    }

    volume_by_group
        .into_iter()
        .filter(|(group, _)| *group != "Recovery")
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(group, _)| group.to_string())
}

fn exercises_for_muscle_group(entries: &[NormalizedEntry], muscle_group: &str) -> Vec<String> {
    let mut exercises: Vec<String> = Vec::new();

    for entry in entries {
        if entry.muscle_group() == muscle_group
            && !exercises.iter().any(|exercise| exercise == entry.exercise())
        {
            exercises.push(entry.exercise().to_string());
        }
        if exercises.len() == 5 {
            break;
        }
    }

    exercises
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use liftlog_domain::{Rpe, WorkoutEntry, normalize};
    use pretty_assertions::assert_eq;

    use crate::embedding::embed_all;

    use super::*;

    fn entry(day: u32, exercise: &str, muscle_group: &str, rpe: u8) -> WorkoutEntry {
        WorkoutEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            exercise: exercise.to_string(),
            muscle_group: muscle_group.to_string(),
            set_notation: "3x10x100".to_string(),
            rpe: Rpe::new(rpe).unwrap(),
        }
    }

    fn sample_entries() -> Vec<liftlog_domain::NormalizedEntry> {
        normalize(&[
            entry(1, "Bench Press", "Chest", 7),
            entry(1, "Incline Press", "Chest", 7),
            entry(2, "Barbell Rows", "Back", 7),
            entry(3, "Squats", "Legs", 7),
            entry(4, "Bench Press", "Chest", 7),
            entry(5, "Lateral Raises", "Shoulders", 7),
        ])
    }

    fn fitted_hybrid(entries: &[liftlog_domain::NormalizedEntry]) -> HybridModel {
        HybridModel {
            collaborative: CollaborativeModel::fit(entries),
            content: ContentModel::fit(&embed_all(entries)).unwrap(),
        }
    }

    #[test]
    fn test_hybrid_never_recommends_recent_exercises() {
        let entries = sample_entries();
        let model = fitted_hybrid(&entries);
        let context =
            WorkoutContext::from_entries(&entries, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        let recent = vec!["Bench Press".to_string(), "Squats".to_string()];

        let recommended = model.recommend(&recent, &context, 3);

        assert!(!recommended.is_empty());
        for exercise in &recent {
            assert!(!recommended.contains(exercise));
        }
    }

    #[test]
    fn test_hybrid_accumulates_scores_across_sources() {
        let mut scores = Vec::new();

        add_rank_decay(
            &mut scores,
            &["A".to_string(), "B".to_string()],
            COLLABORATIVE_WEIGHT,
        );
        add_rank_decay(
            &mut scores,
            &["B".to_string(), "A".to_string()],
            CONTENT_WEIGHT,
        );

        // A: 0.6 * 1.0 + 0.4 * 0.5; B: 0.6 * 0.5 + 0.4 * 1.0.
        assert_eq!(scores[0].0, "A");
        assert!((scores[0].1 - 0.8).abs() < 1e-9);
        assert_eq!(scores[1].0, "B");
        assert!((scores[1].1 - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_context_multiplier() {
        assert_eq!(context_multiplier("Calf Raises", RecoveryStatus::NeedsRest), 1.5);
        assert_eq!(context_multiplier("Cable Rows", RecoveryStatus::LightWorkout), 1.3);
        assert_eq!(context_multiplier("Calf Raises", RecoveryStatus::Ready), 1.0);
        assert_eq!(context_multiplier("Deadlift", RecoveryStatus::NeedsRest), 1.0);
    }

    #[test]
    fn test_context_aware_needs_rest_recommends_rest_activities() {
        let entries = normalize(&[
            entry(1, "Deadlift", "Back", 9),
            entry(2, "Squats", "Legs", 10),
            entry(3, "Bench Press", "Chest", 9),
        ]);
        let context =
            WorkoutContext::from_entries(&entries, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        let (recommended, reasoning) = context_aware(&entries, &context, 5);

        assert_eq!(recommended, vec!["Rest Day", "Light Stretching", "Walking"]);
        assert_eq!(reasoning, "High RPE trend suggests need for recovery");
    }

    #[test]
    fn test_context_aware_ready_targets_weakest_group() {
        let entries = sample_entries();
        let context =
            WorkoutContext::from_entries(&entries, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());

        let (recommended, reasoning) = context_aware(&entries, &context, 5);

        // Back, Legs and Shoulders each have one 3000 entry; alphabetical
        // tie-break picks Back.
        assert_eq!(recommended[0], "Barbell Rows");
        assert!(reasoning.contains("Back is undertrained"));
        assert!(reasoning.contains("Last workout was Shoulders"));
    }

    #[test]
    fn test_weakest_muscle_group_excludes_recovery_and_empty_log() {
        assert_eq!(weakest_muscle_group(&[]), None);

        let entries = normalize(&[
            entry(1, "Walking", "Recovery", 1),
            entry(2, "Bench Press", "Chest", 7),
        ]);

        assert_eq!(weakest_muscle_group(&entries), Some("Chest".to_string()));
    }
}
