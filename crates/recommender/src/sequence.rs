//! Sequence model over daily workout repetition patterns.
//!
//! Entries are grouped into daily exercise lists and scanned in sliding
//! windows of five consecutive workout days. Transition counts are
//! diagonal-only, so the matrix models how often an exercise repeats rather
//! than true next-exercise transitions; scores for other candidates come
//! out uniformly zero and ranking falls back to universe order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use liftlog_domain::NormalizedEntry;
use ndarray::Array2;

pub const SEQUENCE_WINDOW: usize = 5;

#[derive(Debug, Clone)]
pub struct SequenceModel {
    exercises: Vec<String>,
    transitions: Array2<f64>,
}

impl SequenceModel {
    #[must_use]
    pub fn fit(entries: &[NormalizedEntry]) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        for entry in entries {
            days.entry(entry.date())
                .or_default()
                .push(entry.exercise().to_string());
        }

        let daily = days.into_values().collect::<Vec<_>>();
        let windows = if daily.len() < SEQUENCE_WINDOW {
            Vec::new()
        } else {
            daily.windows(SEQUENCE_WINDOW).collect::<Vec<_>>()
        };

        let mut exercises: Vec<String> = Vec::new();
        for window in &windows {
            for day in *window {
                for exercise in day {
                    if !exercises.contains(exercise) {
                        exercises.push(exercise.clone());
                    }
                }
            }
        }

        let n = exercises.len();
        let mut transitions = Array2::zeros((n, n));

        for window in &windows {
            for day in *window {
                for exercise in day {
                    if let Some(idx) = exercises.iter().position(|e| e == exercise) {
                        transitions[[idx, idx]] += 1.0;
                    }
                }
            }
        }

        for mut row in transitions.rows_mut() {
            let sum = row.sum();
            row.mapv_inplace(|v| v / (sum + 1e-8));
        }

        Self {
            exercises,
            transitions,
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &[String] {
        &self.exercises
    }

    /// Recommends up to `k` exercises not in the current sequence, scored by
    /// mean transition probability from the sequence members.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recommend_next(&self, current_sequence: &[String], k: usize) -> Vec<String> {
        if current_sequence.is_empty() {
            return self.exercises.iter().take(k).cloned().collect();
        }

        let mut scores: Vec<(&String, f64)> = Vec::new();

        for (candidate_idx, candidate) in self.exercises.iter().enumerate() {
            if current_sequence.contains(candidate) {
                continue;
            }

            let total = current_sequence
                .iter()
                .filter_map(|sequence_exercise| {
                    self.exercises
                        .iter()
                        .position(|exercise| exercise == sequence_exercise)
                        .map(|sequence_idx| self.transitions[[sequence_idx, candidate_idx]])
                })
                .sum::<f64>();

            scores.push((candidate, total / current_sequence.len() as f64));
        }

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(k)
            .map(|(exercise, _)| exercise.clone())
            .collect()
    }
}
