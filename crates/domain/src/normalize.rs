//! Log normalization and the fingerprint-keyed normalization cache.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{
    entry::{NormalizedEntry, WorkoutEntry, WorkoutLogSource},
    error::LogReadError,
};

/// Expands and enriches raw entries into normalized entries, preserving
/// input order. Consumers that need temporal order sort by date themselves.
#[must_use]
pub fn normalize(entries: &[WorkoutEntry]) -> Vec<NormalizedEntry> {
    entries.iter().flat_map(NormalizedEntry::expand).collect()
}

/// Reads and normalizes a workout log.
///
/// An unreadable log degrades to an empty normalized set so that consumers
/// can still respond; missing columns indicate a malformed log and remain a
/// blocking error.
pub fn load_normalized(
    source: &impl WorkoutLogSource,
) -> Result<Vec<NormalizedEntry>, LogReadError> {
    match source.read_entries() {
        Ok(entries) => Ok(normalize(&entries)),
        Err(LogReadError::Unreadable) => {
            log::error!("workout log could not be read, continuing with empty log");
            Ok(Vec::new())
        }
        Err(error) => Err(error),
    }
}

/// Content hash of a raw entry sequence, used to detect log changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(u64);

impl Fingerprint {
    #[must_use]
    pub fn of(entries: &[WorkoutEntry]) -> Self {
        let mut hasher = DefaultHasher::new();
        entries.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Caches the normalized form of the most recently seen log, keyed by its
/// content fingerprint.
#[derive(Debug, Default)]
pub struct NormalizedCache {
    cached: Option<(Fingerprint, Vec<NormalizedEntry>)>,
}

impl NormalizedCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached normalization if the entries are unchanged,
    /// normalizing and re-caching otherwise.
    pub fn get_or_normalize(&mut self, entries: &[WorkoutEntry]) -> &[NormalizedEntry] {
        let fingerprint = Fingerprint::of(entries);

        let hit = matches!(&self.cached, Some((cached, _)) if *cached == fingerprint);

        if !hit {
            self.cached = Some((fingerprint, normalize(entries)));
        }

        match &self.cached {
            Some((_, normalized)) => normalized,
            None => &[],
        }
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::Rpe;

    use super::*;

    struct FakeSource(Result<Vec<WorkoutEntry>, LogReadError>);

    impl WorkoutLogSource for FakeSource {
        fn read_entries(&self) -> Result<Vec<WorkoutEntry>, LogReadError> {
            self.0.clone()
        }
    }

    fn entry(exercise: &str, muscle_group: &str) -> WorkoutEntry {
        WorkoutEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            exercise: exercise.to_string(),
            muscle_group: muscle_group.to_string(),
            set_notation: "3x10x135".to_string(),
            rpe: Rpe::SEVEN,
        }
    }

    #[test]
    fn test_normalize_expands_compounds_in_order() {
        let normalized = normalize(&[entry("Deadlift", "Back/Hamstrings"), entry("Bench Press", "Chest")]);

        assert_eq!(
            normalized
                .iter()
                .map(|n| (n.exercise(), n.muscle_group()))
                .collect::<Vec<_>>(),
            vec![
                ("Deadlift", "Back"),
                ("Deadlift", "Hamstrings"),
                ("Bench Press", "Chest"),
            ]
        );
    }

    #[test]
    fn test_load_normalized_unreadable_degrades_to_empty() {
        let source = FakeSource(Err(LogReadError::Unreadable));

        assert_eq!(load_normalized(&source), Ok(Vec::new()));
    }

    #[test]
    fn test_load_normalized_missing_columns_is_an_error() {
        let source = FakeSource(Err(LogReadError::MissingColumns(vec!["rpe".to_string()])));

        assert_eq!(
            load_normalized(&source),
            Err(LogReadError::MissingColumns(vec!["rpe".to_string()]))
        );
    }

    #[test]
    fn test_cache_hit_and_invalidation() {
        let mut cache = NormalizedCache::new();
        let entries = vec![entry("Squats", "Quads")];

        assert_eq!(cache.get_or_normalize(&entries).len(), 1);
        assert_eq!(cache.get_or_normalize(&entries).len(), 1);

        let changed = vec![entry("Squats", "Quads"), entry("Lunges", "Glutes")];
        assert_eq!(cache.get_or_normalize(&changed).len(), 2);

        cache.invalidate();
        assert_eq!(cache.get_or_normalize(&entries).len(), 1);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = vec![entry("Squats", "Quads")];
        let b = vec![entry("Lunges", "Quads")];

        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&a));
        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }
}
