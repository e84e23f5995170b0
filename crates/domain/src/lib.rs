#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod context;
pub mod entry;
pub mod error;
pub mod history;
pub mod metrics;
pub mod muscle;
pub mod normalize;
pub mod profile;
pub mod rpe;
pub mod set_notation;

pub use context::{
    DAYS_SINCE_LAST_SENTINEL, RECENT_WINDOW, RecoveryStatus, WorkoutContext, recovery_status,
};
pub use entry::{NormalizedEntry, WorkoutEntry, WorkoutLogSink, WorkoutLogSource};
pub use error::{LogReadError, LogWriteError};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryBuffer};
pub use metrics::{
    average_weight, estimated_one_rm, max_weight_and_reps, total_reps, total_volume,
};
pub use muscle::{expand_compound, group_for_analytics};
pub use normalize::{Fingerprint, NormalizedCache, load_normalized, normalize};
pub use profile::{ExerciseProfile, build_profiles};
pub use rpe::{HIGH_RPE_THRESHOLD, Rpe, RpeError};
pub use set_notation::{SetRecord, parse};
