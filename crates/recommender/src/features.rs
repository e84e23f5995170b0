//! Feature engineering over the normalized workout log.
//!
//! Five feature groups are derived: user-level, muscle-group, exercise,
//! temporal and point-in-time context. All of them operate on the log
//! sorted by date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use liftlog_domain::{HIGH_RPE_THRESHOLD, NormalizedEntry, WorkoutContext};

#[derive(Debug, Clone, PartialEq)]
pub struct UserFeatures {
    pub total_workouts: usize,
    pub workout_days: usize,
    pub avg_workouts_per_day: f32,
    pub days_since_first_workout: i64,
    pub days_since_last_workout: i64,
    pub avg_rpe: f32,
    pub rpe_std: f32,
    pub high_rpe_ratio: f32,
    pub avg_total_volume: f32,
    pub volume_trend: f32,
    pub strength_trend: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupStats {
    pub volume_pct: f32,
    pub workout_count: usize,
    pub avg_rpe: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleGroupFeatures {
    pub per_group: BTreeMap<String, MuscleGroupStats>,
    pub balance_score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseFeatures {
    pub most_frequent_exercise: Option<String>,
    pub exercise_variety: usize,
    pub top_5_share_pct: f32,
    /// Average-weight trend for the ten most frequent exercises.
    pub progression_by_exercise: Vec<(String, f32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemporalFeatures {
    pub weekly_volume_avg: f32,
    pub weekly_volume_std: f32,
    pub weekly_consistency: f32,
    pub preferred_workout_days: Vec<String>,
    pub avg_rest_days: f32,
}

#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    entries: Vec<NormalizedEntry>,
}

impl FeatureEngineer {
    #[must_use]
    pub fn new(entries: &[NormalizedEntry]) -> Self {
        let mut entries = entries.to_vec();
        entries.sort_by_key(NormalizedEntry::date);

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[NormalizedEntry] {
        &self.entries
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn user_features(&self, today: NaiveDate) -> UserFeatures {
        let total_workouts = self.entries.len();
        let workout_days = self
            .entries
            .iter()
            .map(NormalizedEntry::date)
            .collect::<BTreeSet<_>>()
            .len();

        let (days_since_first_workout, days_since_last_workout) = if total_workouts > 1 {
            let first = self.entries[0].date();
            let last = self.entries[total_workouts - 1].date();
            ((last - first).num_days(), (today - last).num_days())
        } else {
            (0, 0)
        };

        let rpes = self
            .entries
            .iter()
            .map(|entry| f32::from(entry.rpe()))
            .collect::<Vec<_>>();
        let volumes = self
            .entries
            .iter()
            .map(|entry| entry.total_volume)
            .collect::<Vec<_>>();
        let one_rms = self
            .entries
            .iter()
            .map(|entry| entry.estimated_one_rm)
            .collect::<Vec<_>>();

        UserFeatures {
            total_workouts,
            workout_days,
            avg_workouts_per_day: total_workouts as f32 / workout_days.max(1) as f32,
            days_since_first_workout,
            days_since_last_workout,
            avg_rpe: mean(&rpes),
            rpe_std: sample_std(&rpes),
            high_rpe_ratio: if rpes.is_empty() {
                0.0
            } else {
                rpes.iter().filter(|rpe| **rpe > HIGH_RPE_THRESHOLD).count() as f32
                    / rpes.len() as f32
            },
            avg_total_volume: mean(&volumes),
            volume_trend: trend(&volumes),
            strength_trend: trend(&one_rms),
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn muscle_group_features(&self) -> MuscleGroupFeatures {
        let mut volume_by_group: BTreeMap<String, f32> = BTreeMap::new();
        for entry in &self.entries {
            *volume_by_group
                .entry(entry.muscle_group().to_string())
                .or_insert(0.0) += entry.total_volume;
        }

        let total_volume = volume_by_group.values().sum::<f32>();

        let per_group = volume_by_group
            .iter()
            .map(|(group, volume)| {
                let group_rpes = self
                    .entries
                    .iter()
                    .filter(|entry| entry.muscle_group() == group)
                    .map(|entry| f32::from(entry.rpe()))
                    .collect::<Vec<_>>();

                (
                    group.clone(),
                    MuscleGroupStats {
                        volume_pct: if total_volume > 0.0 {
                            volume / total_volume * 100.0
                        } else {
                            0.0
                        },
                        workout_count: group_rpes.len(),
                        avg_rpe: mean(&group_rpes),
                    },
                )
            })
            .collect();

        let volumes = volume_by_group.values().copied().collect::<Vec<_>>();

        MuscleGroupFeatures {
            per_group,
            balance_score: balance_score(&volumes),
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn exercise_features(&self) -> ExerciseFeatures {
        let counts = self.exercise_counts();

        let top_5_count = counts.iter().take(5).map(|(_, count)| count).sum::<usize>();

        let progression_by_exercise = counts
            .iter()
            .take(10)
            .map(|(exercise, _)| {
                let weights = self
                    .entries
                    .iter()
                    .filter(|entry| entry.exercise() == exercise)
                    .map(|entry| entry.avg_weight)
                    .collect::<Vec<_>>();

                (exercise.clone(), trend(&weights))
            })
            .collect();

        ExerciseFeatures {
            most_frequent_exercise: counts.first().map(|(exercise, _)| exercise.clone()),
            exercise_variety: counts.len(),
            top_5_share_pct: if self.entries.is_empty() {
                0.0
            } else {
                top_5_count as f32 / self.entries.len() as f32 * 100.0
            },
            progression_by_exercise,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn temporal_features(&self) -> TemporalFeatures {
        let mut weekly_volume: BTreeMap<u32, f32> = BTreeMap::new();
        for entry in &self.entries {
            *weekly_volume.entry(entry.date().iso_week().week()).or_insert(0.0) +=
                entry.total_volume;
        }

        let volumes = weekly_volume.values().copied().collect::<Vec<_>>();
        let weekly_volume_avg = mean(&volumes);
        let weekly_volume_std = sample_std(&volumes);

        let mut day_counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &self.entries {
            *day_counts
                .entry(entry.date().format("%A").to_string())
                .or_insert(0) += 1;
        }

        let mut days = day_counts.into_iter().collect::<Vec<_>>();
        days.sort_by(|a, b| b.1.cmp(&a.1));

        TemporalFeatures {
            weekly_volume_avg,
            weekly_volume_std,
            weekly_consistency: 1.0 - weekly_volume_std / weekly_volume_avg.max(1.0),
            preferred_workout_days: days.into_iter().take(3).map(|(day, _)| day).collect(),
            avg_rest_days: self.avg_rest_days(),
        }
    }

    /// Context features at a point in time, derived from the entries logged
    /// up to and including `target_date`.
    #[must_use]
    pub fn context_features(&self, target_date: NaiveDate) -> WorkoutContext {
        let history = self
            .entries
            .iter()
            .filter(|entry| entry.date() <= target_date)
            .cloned()
            .collect::<Vec<_>>();

        WorkoutContext::from_entries(&history, target_date)
    }

    /// Exercise frequencies, most frequent first, ties in first-seen order.
    fn exercise_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for entry in &self.entries {
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
    }

    #[allow(clippy::cast_precision_loss)]
    fn avg_rest_days(&self) -> f32 {
        let dates = self
            .entries
            .iter()
            .map(NormalizedEntry::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        if dates.len() < 2 {
            return 0.0;
        }

        let gaps = dates
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days() as f32)
            .collect::<Vec<_>>();

        mean(&gaps)
    }
}

/// Ordinary least-squares slope of value against sequence index. Non-finite
/// values are skipped while keeping their index positions; fewer than two
/// valid points yield 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trend(values: &[f32]) -> f32 {
    let points = values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(index, value)| (index as f32, *value))
        .collect::<Vec<_>>();

    let n = points.len() as f32;
    if points.len() < 2 {
        return 0.0;
    }

    let sum_x = points.iter().map(|(x, _)| x).sum::<f32>();
    let sum_y = points.iter().map(|(_, y)| y).sum::<f32>();
    let sum_xy = points.iter().map(|(x, y)| x * y).sum::<f32>();
    let sum_xx = points.iter().map(|(x, _)| x * x).sum::<f32>();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Balance score in [0, 1] from the coefficient of variation of the group
/// volumes. A single group counts as perfectly balanced.
#[must_use]
pub fn balance_score(volumes: &[f32]) -> f32 {
    if volumes.is_empty() {
        return 0.0;
    }

    let cv = sample_std(volumes) / mean(volumes).max(1.0);

    (1.0 - cv).max(0.0)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f32>() / values.len() as f32
}

/// Sample standard deviation (n − 1 denominator), 0 for fewer than two
/// values.
#[allow(clippy::cast_precision_loss)]
fn sample_std(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }

    let m = mean(values);
    let variance =
        values.iter().map(|value| (value - m).powi(2)).sum::<f32>() / (values.len() - 1) as f32;

    variance.sqrt()
}
