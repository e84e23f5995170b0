//! Binary exercise embeddings over characteristic keywords and muscle
//! groups.

use liftlog_domain::NormalizedEntry;
use ndarray::Array1;

use crate::config::{EMBEDDING_DIM, EXERCISE_CATEGORIES, MUSCLE_GROUP_DIMENSIONS};

/// Embeds one exercise: a flag per keyword category followed by a one-hot
/// muscle-group block. The muscle-group label is substring-matched so
/// compound labels light up every constituent dimension.
#[must_use]
pub fn embed(exercise: &str, muscle_group: &str) -> Array1<f64> {
    let exercise_lower = exercise.to_lowercase();
    let mut vector = Vec::with_capacity(EMBEDDING_DIM);

    for (_, keywords) in EXERCISE_CATEGORIES {
        let member = keywords
            .iter()
            .any(|keyword| exercise_lower.contains(keyword));
        vector.push(f64::from(u8::from(member)));
    }

    for muscle in MUSCLE_GROUP_DIMENSIONS {
        vector.push(f64::from(u8::from(muscle_group.contains(muscle))));
    }

    Array1::from_vec(vector)
}

/// Embeds every distinct exercise in the log, in order of first appearance,
/// using the muscle-group label of its first entry.
#[must_use]
pub fn embed_all(entries: &[NormalizedEntry]) -> Vec<(String, Array1<f64>)> {
    let mut embeddings: Vec<(String, Array1<f64>)> = Vec::new();

    for entry in entries {
        if embeddings
            .iter()
            .any(|(exercise, _)| exercise == entry.exercise())
        {
            continue;
        }

        embeddings.push((
            entry.exercise().to_string(),
            embed(entry.exercise(), entry.muscle_group()),
        ));
    }

    embeddings
}
