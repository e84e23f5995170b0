//! Aggregate per-exercise statistics, rebuilt from the normalized log on
//! every recommendation or planning request.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::entry::NormalizedEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProfile {
    pub exercise: String,
    pub muscle_group: String,
    pub avg_weight: f32,
    pub max_weight: f32,
    pub avg_reps: f32,
    pub max_reps: u32,
    pub avg_sets: f32,
    pub recent_rpe: f32,
    pub progression_rate: f32,
    pub frequency: usize,
    pub last_performed: NaiveDate,
}

/// Builds one profile per exercise, in order of first appearance in the
/// date-sorted log. The order is part of the contract: downstream ranking
/// uses stable sorts, so it decides ties.
#[must_use]
pub fn build_profiles(entries: &[NormalizedEntry]) -> Vec<ExerciseProfile> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(NormalizedEntry::date);

    let mut order = Vec::new();
    let mut seen = BTreeSet::new();

    for entry in &sorted {
        if seen.insert(entry.exercise().to_string()) {
            order.push(entry.exercise().to_string());
        }
    }

    order
        .into_iter()
        .filter_map(|exercise| {
            let group = sorted
                .iter()
                .filter(|entry| entry.exercise() == exercise)
                .collect::<Vec<_>>();

            build_profile(&exercise, &group)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn build_profile(exercise: &str, group: &[&NormalizedEntry]) -> Option<ExerciseProfile> {
    let first = group.first()?;
    let last = group.last()?;
    let count = group.len() as f32;

    let workout_days = group
        .iter()
        .map(|entry| entry.date())
        .collect::<BTreeSet<_>>()
        .len()
        .max(1) as f32;

    let recent = &group[group.len().saturating_sub(3)..];
    let recent_rpe = recent
        .iter()
        .map(|entry| f32::from(entry.rpe()))
        .sum::<f32>()
        / recent.len() as f32;

    Some(ExerciseProfile {
        exercise: exercise.to_string(),
        muscle_group: first.muscle_group().to_string(),
        avg_weight: group.iter().map(|entry| entry.avg_weight).sum::<f32>() / count,
        max_weight: group
            .iter()
            .map(|entry| entry.max_weight)
            .fold(0.0, f32::max),
        avg_reps: group
            .iter()
            .map(|entry| entry.total_reps as f32)
            .sum::<f32>()
            / count,
        max_reps: group
            .iter()
            .map(|entry| entry.max_reps)
            .max()
            .unwrap_or(0),
        avg_sets: count / workout_days,
        recent_rpe,
        progression_rate: ((last.avg_weight - first.avg_weight) / count).max(0.0),
        frequency: group.len(),
        last_performed: last.date(),
    })
}
