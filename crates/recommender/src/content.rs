//! Content-based filtering over reduced exercise embeddings.

use linfa::prelude::*;
use linfa_reduction::Pca;
use ndarray::{Array1, Array2, ArrayView1, Axis};

pub const COMPONENTS: usize = 10;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FitError {
    #[error("no exercises to fit")]
    Empty,
    #[error("dimensionality reduction failed: {0}")]
    Reduction(String),
}

#[derive(Debug, Clone)]
pub struct ContentModel {
    exercises: Vec<String>,
    reduced: Array2<f64>,
}

impl ContentModel {
    /// Standardizes the embeddings per column and reduces them with PCA.
    /// The component count is clamped to the sample and feature counts so
    /// small logs remain fittable.
    pub fn fit(embeddings: &[(String, Array1<f64>)]) -> Result<Self, FitError> {
        let first = embeddings.first().ok_or(FitError::Empty)?;

        let n_samples = embeddings.len();
        let n_features = first.1.len();

        let mut matrix = Array2::zeros((n_samples, n_features));
        for (row, (_, embedding)) in embeddings.iter().enumerate() {
            matrix.row_mut(row).assign(embedding);
        }

        standardize(&mut matrix);

        let components = COMPONENTS.min(n_samples).min(n_features).max(1);
        let dataset = Dataset::from(matrix.clone());
        let pca = Pca::params(components)
            .fit(&dataset)
            .map_err(|error| FitError::Reduction(error.to_string()))?;
        let reduced = pca.predict(&matrix);

        Ok(Self {
            exercises: embeddings
                .iter()
                .map(|(exercise, _)| exercise.clone())
                .collect(),
            reduced,
        })
    }

    #[must_use]
    pub fn exercises(&self) -> &[String] {
        &self.exercises
    }

    /// Recommends up to `k` exercises by cosine similarity to the mean
    /// reduced vector of the preferred exercises. With no usable preference
    /// signal, the first `k` fitted exercises are returned.
    #[must_use]
    pub fn recommend(&self, preferred: &[String], k: usize) -> Vec<String> {
        let preferred_rows = preferred
            .iter()
            .filter_map(|exercise| {
                self.exercises
                    .iter()
                    .position(|fitted| fitted == exercise)
            })
            .collect::<Vec<_>>();

        if preferred_rows.is_empty() {
            return self.exercises.iter().take(k).cloned().collect();
        }

        let mut preference = Array1::<f64>::zeros(self.reduced.ncols());
        for &row in &preferred_rows {
            preference += &self.reduced.row(row);
        }
        #[allow(clippy::cast_precision_loss)]
        {
            preference /= preferred_rows.len() as f64;
        }

        let mut scores: Vec<(&String, f64)> = Vec::new();

        for (row, exercise) in self.exercises.iter().enumerate() {
            if preferred.contains(exercise) {
                continue;
            }

            scores.push((
                exercise,
                cosine_similarity(preference.view(), self.reduced.row(row)),
            ));
        }

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(k)
            .map(|(exercise, _)| exercise.clone())
            .collect()
    }
}

/// Z-scores each column in place. Zero-variance columns are left centered
/// at zero instead of dividing by zero.
fn standardize(matrix: &mut Array2<f64>) {
    #[allow(clippy::cast_precision_loss)]
    let n = matrix.nrows() as f64;

    for mut column in matrix.axis_iter_mut(Axis(1)) {
        let mean = column.sum() / n;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        column.mapv_inplace(|v| if std > 0.0 { (v - mean) / std } else { v - mean });
    }
}

fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    a.dot(&b) / (norm_a * norm_b)
}
