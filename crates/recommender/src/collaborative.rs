//! Collaborative filtering over exercise co-occurrence.
//!
//! Similarity between two exercises is the Jaccard index of the sets of
//! calendar dates on which each was logged, restricted to the top 20 most
//! frequent exercises.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use liftlog_domain::NormalizedEntry;
use ndarray::Array2;

pub const TOP_EXERCISES: usize = 20;

#[derive(Debug, Clone)]
pub struct CollaborativeModel {
    top_exercises: Vec<String>,
    similarity: Array2<f64>,
}

impl CollaborativeModel {
    #[must_use]
    pub fn fit(entries: &[NormalizedEntry]) -> Self {
        let top_exercises = top_exercises_by_frequency(entries);
        let n = top_exercises.len();

        let session_dates = top_exercises
            .iter()
            .map(|exercise| {
                entries
                    .iter()
                    .filter(|entry| entry.exercise() == exercise)
                    .map(NormalizedEntry::date)
                    .collect::<BTreeSet<NaiveDate>>()
            })
            .collect::<Vec<_>>();

        let mut similarity = Array2::zeros((n, n));

        for i in 0..n {
            for j in 0..n {
                similarity[[i, j]] = if i == j {
                    1.0
                } else {
                    jaccard(&session_dates[i], &session_dates[j])
                };
            }
        }

        Self {
            top_exercises,
            similarity,
        }
    }

    #[must_use]
    pub fn top_exercises(&self) -> &[String] {
        &self.top_exercises
    }

    #[must_use]
    pub fn similarity(&self) -> &Array2<f64> {
        &self.similarity
    }

    /// Recommends up to `k` exercises not in `recent`, scored by mean
    /// similarity to the recent exercises. With no recent history, the most
    /// frequent exercises are returned as-is.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn recommend(&self, recent: &[String], k: usize) -> Vec<String> {
        if recent.is_empty() {
            return self
                .top_exercises
                .iter()
                .take(k)
                .cloned()
                .collect();
        }

        let mut scores: Vec<(&String, f64)> = Vec::new();

        for (candidate_idx, candidate) in self.top_exercises.iter().enumerate() {
            if recent.contains(candidate) {
                continue;
            }

            // Recents outside the fitted vocabulary contribute zero but
            // still count toward the mean.
            let total = recent
                .iter()
                .filter_map(|recent_exercise| {
                    self.top_exercises
                        .iter()
                        .position(|exercise| exercise == recent_exercise)
                        .map(|recent_idx| self.similarity[[candidate_idx, recent_idx]])
                })
                .sum::<f64>();

            scores.push((candidate, total / recent.len() as f64));
        }

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(k)
            .map(|(exercise, _)| exercise.clone())
            .collect()
    }
}

fn top_exercises_by_frequency(entries: &[NormalizedEntry]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for entry in entries {
        match counts
            .iter_mut()
            .find(|(exercise, _)| exercise == entry.exercise())
        {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.exercise().to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_EXERCISES)
        .map(|(exercise, _)| exercise)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &BTreeSet<NaiveDate>, b: &BTreeSet<NaiveDate>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union.max(1) as f64
}
