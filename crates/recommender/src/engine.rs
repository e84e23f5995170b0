//! The recommendation engine facade: training, strategy dispatch and
//! reasoning assembly.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use liftlog_domain::{NormalizedEntry, RecoveryStatus, WorkoutContext};
use serde::Serialize;

use crate::{
    collaborative::CollaborativeModel,
    content::{ContentModel, FitError},
    embedding::embed_all,
    error::{RecommendError, TrainingError},
    features::FeatureEngineer,
    hybrid::{self, HybridModel},
    performance::{ModelPerformance, model_performance},
    sequence::SequenceModel,
};

/// Days of history counted as "recent" when excluding exercises from
/// recommendations.
pub const RECENT_EXERCISE_DAYS: u64 = 7;

#[derive(
    strum::Display, strum::EnumString, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    Hybrid,
    Collaborative,
    Content,
    Sequence,
    ContextAware,
}

impl Strategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Hybrid => "Hybrid (Collaborative + Content + Context)",
            Strategy::Collaborative => "Collaborative Filtering",
            Strategy::Content => "Content-Based Filtering",
            Strategy::Sequence => "Sequence-Based",
            Strategy::ContextAware => "Context-Aware",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub strategy: String,
    pub exercises: Vec<String>,
    pub reasoning: String,
}

/// All models fitted on one normalized log.
#[derive(Debug, Clone)]
pub struct TrainedRecommender {
    entries: Vec<NormalizedEntry>,
    features: FeatureEngineer,
    hybrid: HybridModel,
    sequence: SequenceModel,
}

impl TrainedRecommender {
    /// Fits all models. Fails on an empty log or one spanning fewer than
    /// two distinct workout dates.
    pub fn train(entries: &[NormalizedEntry]) -> Result<Self, TrainingError> {
        if entries.is_empty() {
            return Err(TrainingError::EmptyLog);
        }

        let distinct_dates = entries
            .iter()
            .map(NormalizedEntry::date)
            .collect::<BTreeSet<_>>()
            .len();
        if distinct_dates < 2 {
            return Err(TrainingError::InsufficientHistory(distinct_dates));
        }

        let features = FeatureEngineer::new(entries);
        let entries = features.entries().to_vec();

        log::debug!(
            "training recommender on {} entries over {distinct_dates} days",
            entries.len()
        );

        let collaborative = CollaborativeModel::fit(&entries);
        let content = ContentModel::fit(&embed_all(&entries)).map_err(|error| match error {
            FitError::Empty => TrainingError::EmptyLog,
            FitError::Reduction(message) => TrainingError::Fit(message),
        })?;
        let sequence = SequenceModel::fit(&entries);

        Ok(Self {
            entries,
            features,
            hybrid: HybridModel {
                collaborative,
                content,
            },
            sequence,
        })
    }

    /// Recommends up to `k` exercises with the given strategy, relative to
    /// `today`.
    #[must_use]
    pub fn recommend(&self, strategy: Strategy, k: usize, today: NaiveDate) -> Recommendation {
        let context = self.features.context_features(today);
        let recent = self.recent_exercises(today);

        log::debug!(
            "recommending with {strategy}, {} recent exercises, recovery {}",
            recent.len(),
            context.recovery_status
        );

        let (exercises, reasoning) = match strategy {
            Strategy::Hybrid => (
                self.hybrid.recommend(&recent, &context, k),
                self.reasoning(strategy, &recent, Some(&context)),
            ),
            Strategy::Collaborative => (
                self.hybrid.collaborative.recommend(&recent, k),
                self.reasoning(strategy, &recent, None),
            ),
            Strategy::Content => (
                self.hybrid.content.recommend(&recent, k),
                self.reasoning(strategy, &recent, None),
            ),
            Strategy::Sequence => (
                self.sequence.recommend_next(&recent, k),
                self.reasoning(strategy, &recent, None),
            ),
            Strategy::ContextAware => hybrid::context_aware(&self.entries, &context, k),
        };

        Recommendation {
            strategy: strategy.label().to_string(),
            exercises,
            reasoning,
        }
    }

    /// Recommends with a strategy given by name, for callers that take the
    /// strategy as user input.
    pub fn recommend_by_name(
        &self,
        strategy: &str,
        k: usize,
        today: NaiveDate,
    ) -> Result<Recommendation, RecommendError> {
        let strategy = Strategy::from_str(strategy).map_err(|_| {
            log::error!("unknown recommendation strategy requested: {strategy}");
            RecommendError::UnknownStrategy(strategy.to_string())
        })?;

        Ok(self.recommend(strategy, k, today))
    }

    #[must_use]
    pub fn performance(&self, today: NaiveDate) -> ModelPerformance {
        model_performance(&self.entries, &self.hybrid, today)
    }

    #[must_use]
    pub fn features(&self) -> &FeatureEngineer {
        &self.features
    }

    /// Distinct exercises logged in the last week, in first-seen order.
    fn recent_exercises(&self, today: NaiveDate) -> Vec<String> {
        let cutoff = today
            .checked_sub_days(Days::new(RECENT_EXERCISE_DAYS))
            .unwrap_or(NaiveDate::MIN);

        let mut recent: Vec<String> = Vec::new();
        for entry in &self.entries {
            if entry.date() >= cutoff && !recent.iter().any(|e| e == entry.exercise()) {
                recent.push(entry.exercise().to_string());
            }
        }

        recent
    }

    fn reasoning(
        &self,
        strategy: Strategy,
        recent: &[String],
        context: Option<&WorkoutContext>,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        match strategy {
            Strategy::Hybrid => {
                parts.push(
                    "Combines your exercise preferences with similar exercise characteristics"
                        .to_string(),
                );
                if let Some(context) = context {
                    if context.recovery_status != RecoveryStatus::Ready {
                        parts.push(format!(
                            "Adjusted for recovery status: {}",
                            context.recovery_status
                        ));
                    }
                }
            }
            Strategy::Collaborative => {
                parts.push("Based on exercises you've done frequently".to_string());
            }
            Strategy::Content => {
                parts.push("Based on similarity to exercises you prefer".to_string());
            }
            Strategy::Sequence => {
                parts.push("Based on your workout patterns and sequences".to_string());
            }
            Strategy::ContextAware => {}
        }

        if !recent.is_empty() {
            parts.push(format!(
                "Considering your recent exercises: {}",
                recent
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        parts.join(" | ")
    }
}
