//! Self-test metrics for a trained recommender.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use liftlog_domain::{NormalizedEntry, WorkoutContext};
use serde::Serialize;

use crate::hybrid::HybridModel;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelPerformance {
    pub total_workouts: usize,
    pub unique_exercises: usize,
    pub muscle_groups: usize,
    pub prediction_accuracy: f32,
    pub status: String,
}

#[must_use]
pub fn model_performance(
    entries: &[NormalizedEntry],
    hybrid: &HybridModel,
    today: NaiveDate,
) -> ModelPerformance {
    ModelPerformance {
        total_workouts: entries.len(),
        unique_exercises: entries
            .iter()
            .map(NormalizedEntry::exercise)
            .collect::<BTreeSet<_>>()
            .len(),
        muscle_groups: entries
            .iter()
            .map(NormalizedEntry::muscle_group)
            .collect::<BTreeSet<_>>()
            .len(),
        prediction_accuracy: prediction_accuracy(entries, hybrid, today),
        status: "Trained and Ready".to_string(),
    }
}

/// Hit rate of the hybrid model over the last fifth of the log: for each
/// held-out entry, predict five exercises from the three entries before it
/// and count a hit if the actual exercise is among them.
///
/// This is a self-referential heuristic, not a held-out validation: the
/// model was fitted on the full log and the context is derived from the
/// full history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn prediction_accuracy(
    entries: &[NormalizedEntry],
    hybrid: &HybridModel,
    today: NaiveDate,
) -> f32 {
    if entries.len() < 10 {
        return 0.0;
    }

    let test_size = (entries.len() / 5).max(1);
    let test_start = entries.len() - test_size;
    let context = WorkoutContext::from_entries(entries, today);

    let mut correct = 0_usize;
    let mut total = 0_usize;

    for i in 0..test_size.saturating_sub(1) {
        let history = &entries[..test_start + i];
        let actual = entries[test_start + i + 1].exercise();

        let recent = history
            .iter()
            .rev()
            .take(3)
            .map(|entry| entry.exercise().to_string())
            .collect::<Vec<_>>();

        let predictions = hybrid.recommend(&recent, &context, 5);

        if predictions.iter().any(|prediction| prediction == actual) {
            correct += 1;
        }
        total += 1;
    }

    correct as f32 / total.max(1) as f32
}
