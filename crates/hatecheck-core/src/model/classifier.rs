use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Classifier, Label};
use crate::error::{HatecheckError, Result};

/// Serialized linear model: one weight row and one bias per label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub labels: Vec<Label>,
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Arg-max linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    model: LinearModel,
    dim: usize,
}

impl LinearClassifier {
    /// Validate shapes and build the classifier
    pub fn from_model(model: LinearModel) -> Result<Self> {
        let n = model.labels.len();
        if n == 0 {
            return Err(HatecheckError::invalid_value("classifier model", "no labels"));
        }
        if model.weights.len() != n || model.bias.len() != n {
            return Err(HatecheckError::invalid_value(
                "classifier model",
                format!(
                    "{} labels but {} weight rows and {} biases",
                    n,
                    model.weights.len(),
                    model.bias.len()
                ),
            ));
        }

        let dim = model.weights[0].len();
        if dim == 0 || model.weights.iter().any(|row| row.len() != dim) {
            return Err(HatecheckError::invalid_value(
                "classifier model",
                "weight rows must share one non-zero width",
            ));
        }

        Ok(LinearClassifier { model, dim })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let model: LinearModel = serde_json::from_str(content)?;
        Self::from_model(model)
    }

    /// Load a model artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HatecheckError::not_found(
                "classifier model",
                path.display(),
            ));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Input width the model expects
    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn labels(&self) -> &[Label] {
        &self.model.labels
    }

    fn score(&self, row: usize, vector: &[f32]) -> f32 {
        self.model.weights[row]
            .iter()
            .zip(vector)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.model.bias[row]
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, vector: &[f32]) -> Result<Label> {
        if vector.len() != self.dim {
            return Err(HatecheckError::invalid_value(
                "embedding dimension",
                format!("{} (model expects {})", vector.len(), self.dim),
            ));
        }

        let mut best = 0;
        let mut best_score = self.score(0, vector);
        for row in 1..self.model.labels.len() {
            let score = self.score(row, vector);
            if score > best_score {
                best = row;
                best_score = score;
            }
        }

        tracing::debug!(label = %self.model.labels[best], score = best_score, "classified");
        Ok(self.model.labels[best].clone())
    }
}
