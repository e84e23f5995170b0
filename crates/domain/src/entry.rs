use chrono::NaiveDate;

use crate::{
    error::{LogReadError, LogWriteError},
    metrics, muscle,
    rpe::Rpe,
    set_notation::{self, SetRecord},
};

/// One raw row of the workout log.
///
/// Immutable once read. The muscle-group label may be a compound
/// (`"Back/Biceps"`); normalization expands such entries into one row per
/// constituent group.
#[derive(Debug, Clone, Hash, PartialEq)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub exercise: String,
    pub muscle_group: String,
    pub set_notation: String,
    pub rpe: Rpe,
}

/// A [`WorkoutEntry`] with a single (non-compound) muscle group and all
/// derived per-entry metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub entry: WorkoutEntry,
    pub set_records: Vec<SetRecord>,
    pub total_volume: f32,
    pub avg_weight: f32,
    pub total_reps: u32,
    pub estimated_one_rm: f32,
    pub max_weight: f32,
    pub max_reps: u32,
    pub grouped_muscle_group: String,
}

impl NormalizedEntry {
    /// Expands one raw entry into per-muscle-group normalized entries.
    ///
    /// A compound-labeled entry counts fully toward each constituent group,
    /// so volume and RPE contributions are duplicated across the expanded
    /// rows.
    #[must_use]
    pub fn expand(entry: &WorkoutEntry) -> Vec<NormalizedEntry> {
        let set_records = set_notation::parse(&entry.set_notation);
        let total_volume = metrics::total_volume(&set_records);
        let avg_weight = metrics::average_weight(&set_records);
        let total_reps = metrics::total_reps(&set_records);
        let estimated_one_rm = metrics::estimated_one_rm(&set_records);
        let (max_weight, max_reps) = metrics::max_weight_and_reps(&set_records);

        muscle::expand_compound(&entry.muscle_group)
            .into_iter()
            .map(|muscle_group| NormalizedEntry {
                entry: WorkoutEntry {
                    muscle_group: muscle_group.clone(),
                    ..entry.clone()
                },
                set_records: set_records.clone(),
                total_volume,
                avg_weight,
                total_reps,
                estimated_one_rm,
                max_weight,
                max_reps,
                grouped_muscle_group: muscle::group_for_analytics(&muscle_group),
            })
            .collect()
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }

    #[must_use]
    pub fn exercise(&self) -> &str {
        &self.entry.exercise
    }

    #[must_use]
    pub fn muscle_group(&self) -> &str {
        &self.entry.muscle_group
    }

    #[must_use]
    pub fn rpe(&self) -> Rpe {
        self.entry.rpe
    }
}

pub trait WorkoutLogSource {
    fn read_entries(&self) -> Result<Vec<WorkoutEntry>, LogReadError>;
}

pub trait WorkoutLogSink {
    fn append_entry(&mut self, entry: WorkoutEntry) -> Result<(), LogWriteError>;
}
