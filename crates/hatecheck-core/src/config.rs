//! Store configuration for hatecheck
//!
//! Configuration is stored in `.hatecheck/config.toml`. Every field has a
//! default, so a missing file or a partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_PASSWORD_COST;
use crate::error::{HatecheckError, Result};
use crate::model::DEFAULT_EMBEDDING_DIM;
use crate::text::stopwords::{load_list, StopwordSet};

/// Current config format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Config format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Embedding and classifier settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Extra stopword lists
    #[serde(default)]
    pub stopwords: StopwordConfig,

    /// Credential settings
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Width of sentence vectors
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Classifier artifact, relative to the store root unless absolute
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopwordConfig {
    /// Newline-separated lists merged into the built-in set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt cost for newly registered passwords
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_embedding_dim() -> usize {
    DEFAULT_EMBEDDING_DIM
}

fn default_classifier_path() -> String {
    "model.json".to_string()
}

fn default_password_cost() -> u32 {
    DEFAULT_PASSWORD_COST
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            version: default_version(),
            model: ModelConfig::default(),
            stopwords: StopwordConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            password_cost: default_password_cost(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            embedding_dim: default_embedding_dim(),
            classifier_path: default_classifier_path(),
        }
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

impl ServiceConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ServiceConfig = toml::from_str(&content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            tracing::warn!(
                version = config.version,
                supported = CONFIG_FORMAT_VERSION,
                "config written by a newer hatecheck"
            );
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HatecheckError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Absolute path of the classifier artifact for a store rooted at `root`
    pub fn classifier_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.model.classifier_path)
    }

    /// Built-in stopwords plus every configured extra list
    pub fn build_stopwords(&self, root: &Path) -> Result<StopwordSet> {
        self.stopwords
            .extra_files
            .iter()
            .try_fold(StopwordSet::builtin(), |set, file| -> Result<StopwordSet> {
                Ok(set.with_extra(load_list(&resolve(root, file))?))
            })
    }
}
