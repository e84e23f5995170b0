#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod collaborative;
pub mod config;
pub mod content;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod features;
pub mod hybrid;
pub mod performance;
pub mod planner;
pub mod sequence;

pub use collaborative::{CollaborativeModel, TOP_EXERCISES};
pub use content::{COMPONENTS, ContentModel, FitError};
pub use embedding::{embed, embed_all};
pub use engine::{
    RECENT_EXERCISE_DAYS, Recommendation, Strategy, TrainedRecommender,
};
pub use error::{RecommendError, TrainingError};
pub use features::{
    ExerciseFeatures, FeatureEngineer, MuscleGroupFeatures, MuscleGroupStats, TemporalFeatures,
    UserFeatures, balance_score, trend,
};
pub use hybrid::{
    COLLABORATIVE_WEIGHT, CONTENT_WEIGHT, HybridModel, context_aware, weakest_muscle_group,
};
pub use performance::{ModelPerformance, model_performance, prediction_accuracy};
pub use planner::{PlannedExercise, WorkoutPlan, WorkoutType, plan_workout};
pub use sequence::{SEQUENCE_WINDOW, SequenceModel};
