//! Vectorization and classification
//!
//! The detection service only sees the [`Embedder`] and [`Classifier`]
//! traits. The implementations shipped here are small, deterministic
//! stand-ins for pretrained artifacts: a feature-hashing sentence vectorizer
//! and a linear model loaded from JSON.

mod classifier;
mod embedding;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
pub use classifier::{LinearClassifier, LinearModel};
pub use embedding::HashingEmbedder;

/// Default embedding width
pub const DEFAULT_EMBEDDING_DIM: usize = 100;

/// Text in, fixed-length vector out
pub trait Embedder: Send + Sync {
    /// Length of every vector returned by [`Embedder::embed`]
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Vector in, discrete label out
pub trait Classifier: Send + Sync {
    fn predict(&self, vector: &[f32]) -> Result<Label>;
}

/// A classifier output label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}
