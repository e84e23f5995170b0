//! Point-in-time recommendation context derived from recent log entries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    entry::NormalizedEntry,
    rpe::Rpe,
};

/// Number of most recent entries considered for recovery assessment.
pub const RECENT_WINDOW: usize = 5;

/// Sentinel for "no workout logged yet".
pub const DAYS_SINCE_LAST_SENTINEL: i64 = 999;

#[derive(
    strum::Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
)]
#[strum(serialize_all = "snake_case")]
pub enum RecoveryStatus {
    Ready,
    LightWorkout,
    NeedsRest,
}

/// Classifies recovery from the most recent entries: three or more
/// high-effort sessions out of the last five call for rest, exactly two for
/// a light workout.
#[must_use]
pub fn recovery_status(recent: &[NormalizedEntry]) -> RecoveryStatus {
    let window = recent.len().saturating_sub(RECENT_WINDOW);
    let high_effort = recent[window..]
        .iter()
        .filter(|entry| entry.rpe().is_high_effort())
        .count();

    match high_effort {
        3.. => RecoveryStatus::NeedsRest,
        2 => RecoveryStatus::LightWorkout,
        _ => RecoveryStatus::Ready,
    }
}

/// Snapshot of the training situation at a point in time, derived purely
/// from the entries preceding it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutContext {
    pub last_muscle_group: Option<String>,
    pub last_rpe: Option<Rpe>,
    pub last_volume: f32,
    pub days_since_last: i64,
    pub recent_muscle_group_frequency: BTreeMap<String, usize>,
    pub recovery_status: RecoveryStatus,
}

impl WorkoutContext {
    /// Derives the context from date-ordered entries relative to `today`.
    /// Entries are sorted by date internally, so callers may pass the log in
    /// any order.
    #[must_use]
    pub fn from_entries(entries: &[NormalizedEntry], today: NaiveDate) -> Self {
        let mut sorted = entries.to_vec();
        sorted.sort_by_key(NormalizedEntry::date);

        let Some(last) = sorted.last() else {
            return Self {
                last_muscle_group: None,
                last_rpe: None,
                last_volume: 0.0,
                days_since_last: DAYS_SINCE_LAST_SENTINEL,
                recent_muscle_group_frequency: BTreeMap::new(),
                recovery_status: RecoveryStatus::Ready,
            };
        };

        let recent_start = sorted.len().saturating_sub(RECENT_WINDOW);
        let mut recent_muscle_group_frequency = BTreeMap::new();

        for entry in &sorted[recent_start..] {
            *recent_muscle_group_frequency
                .entry(entry.muscle_group().to_string())
                .or_insert(0) += 1;
        }

        Self {
            last_muscle_group: Some(last.muscle_group().to_string()),
            last_rpe: Some(last.rpe()),
            last_volume: last.total_volume,
            days_since_last: (today - last.date()).num_days(),
            recent_muscle_group_frequency,
            recovery_status: recovery_status(&sorted),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{entry::WorkoutEntry, normalize::normalize};

    use super::*;

    fn entries_with_rpes(rpes: &[u8]) -> Vec<NormalizedEntry> {
        let raw = rpes
            .iter()
            .enumerate()
            .map(|(i, &rpe)| WorkoutEntry {
                date: NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                exercise: format!("Exercise {i}"),
                muscle_group: "Back".to_string(),
                set_notation: "3x10x100".to_string(),
                rpe: Rpe::new(rpe).unwrap(),
            })
            .collect::<Vec<_>>();

        normalize(&raw)
    }

    #[rstest]
    #[case::empty(&[], RecoveryStatus::Ready)]
    #[case::no_high(&[7, 8, 8, 7, 6], RecoveryStatus::Ready)]
    #[case::one_high(&[9, 7, 7, 7, 7], RecoveryStatus::Ready)]
    #[case::two_high(&[9, 9, 7, 7, 7], RecoveryStatus::LightWorkout)]
    #[case::three_high(&[9, 10, 9, 7, 7], RecoveryStatus::NeedsRest)]
    #[case::four_high(&[9, 10, 9, 9, 7], RecoveryStatus::NeedsRest)]
    #[case::five_high(&[9, 9, 9, 9, 9], RecoveryStatus::NeedsRest)]
    #[case::only_last_five_count(&[9, 9, 9, 7, 7, 7, 7, 7], RecoveryStatus::Ready)]
    fn test_recovery_status(#[case] rpes: &[u8], #[case] expected: RecoveryStatus) {
        assert_eq!(recovery_status(&entries_with_rpes(rpes)), expected);
    }

    #[test]
    fn test_context_empty_log() {
        let context =
            WorkoutContext::from_entries(&[], NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        assert_eq!(context.last_muscle_group, None);
        assert_eq!(context.last_rpe, None);
        assert_eq!(context.last_volume, 0.0);
        assert_eq!(context.days_since_last, DAYS_SINCE_LAST_SENTINEL);
        assert_eq!(context.recovery_status, RecoveryStatus::Ready);
        assert!(context.recent_muscle_group_frequency.is_empty());
    }

    #[test]
    fn test_context_from_entries() {
        let entries = entries_with_rpes(&[7, 7, 9, 9, 7, 8]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let context = WorkoutContext::from_entries(&entries, today);

        assert_eq!(context.last_muscle_group, Some("Back".to_string()));
        assert_eq!(context.last_rpe, Some(Rpe::EIGHT));
        assert_eq!(context.last_volume, 3000.0);
        assert_eq!(context.days_since_last, 4);
        assert_eq!(context.recent_muscle_group_frequency.get("Back"), Some(&5));
        assert_eq!(context.recovery_status, RecoveryStatus::LightWorkout);
    }

    #[test]
    fn test_recovery_status_display() {
        assert_eq!(RecoveryStatus::Ready.to_string(), "ready");
        assert_eq!(RecoveryStatus::LightWorkout.to_string(), "light_workout");
        assert_eq!(RecoveryStatus::NeedsRest.to_string(), "needs_rest");
    }
}
