//! Text preprocessing for code-mixed social-media text
//!
//! Raw text goes through four stages, always in this order:
//! normalize -> tokenize -> collapse character runs -> remove stopwords.
//! The surviving tokens are joined with single spaces.

pub mod collapse;
pub mod emoji;
pub mod normalize;
pub mod stopwords;
pub mod tokenize;

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
pub use collapse::{collapse_runs, collapse_token};
pub use normalize::Normalizer;
pub use stopwords::{remove_stopwords, StopwordSet};
pub use tokenize::tokenize;

/// Output of every stage for one input, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineTrace {
    pub raw: String,
    pub normalized: String,
    pub tokens: Vec<String>,
    pub collapsed: Vec<String>,
    pub filtered: Vec<String>,
    pub output: String,
}

/// The preprocessing pipeline
///
/// Holds the compiled normalizer and a shared, read-only stopword set.
/// Calls are pure and safe from any thread.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    normalizer: Arc<Normalizer>,
    stopwords: Arc<StopwordSet>,
}

impl Preprocessor {
    pub fn new(stopwords: Arc<StopwordSet>) -> Result<Self> {
        Ok(Preprocessor {
            normalizer: Arc::new(Normalizer::new()?),
            stopwords,
        })
    }

    /// Pipeline using the bundled English and Hinglish stopwords
    pub fn builtin() -> Result<Self> {
        Self::new(Arc::new(StopwordSet::builtin()))
    }

    /// Run the full pipeline and join the surviving tokens
    pub fn preprocess_main(&self, raw: &str) -> String {
        let normalized = self.normalizer.normalize(raw);
        let tokens = tokenize(&normalized);
        let collapsed = collapse_runs(&tokens);
        remove_stopwords(collapsed, &self.stopwords).join(" ")
    }

    /// Same as [`Preprocessor::preprocess_main`] but keeps every stage
    pub fn trace(&self, raw: &str) -> PipelineTrace {
        let normalized = self.normalizer.normalize(raw);
        let tokens = tokenize(&normalized);
        let collapsed = collapse_runs(&tokens);
        let filtered = remove_stopwords(collapsed.clone(), &self.stopwords);
        let output = filtered.join(" ");

        PipelineTrace {
            raw: raw.to_string(),
            normalized,
            tokens,
            collapsed,
            filtered,
            output,
        }
    }
}
