//! Store management for hatecheck
//!
//! The store is the directory holding the configuration, the user database
//! and, by default, the classifier artifact. Default location: `.hatecheck/`.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::db::Database;
use crate::error::{HatecheckError, Result};
use crate::model::{Classifier, Embedder, HashingEmbedder, LinearClassifier};
use crate::service::DetectionService;
use crate::text::Preprocessor;
use paths::CONFIG_FILE;

/// An opened hatecheck store
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: ServiceConfig,
    db: Database,
}

impl Store {
    /// Create a store at `path` (idempotent; an existing config is kept)
    #[tracing::instrument(skip(path, config), fields(path = %path.display()))]
    pub fn init(path: &Path, config: ServiceConfig) -> Result<Self> {
        fs::create_dir_all(path).map_err(|e| HatecheckError::FailedOperation {
            operation: format!("create store directory {}", path.display()),
            reason: e.to_string(),
        })?;

        let config_path = path.join(CONFIG_FILE);
        if config_path.exists() {
            tracing::info!("Store already initialized, keeping existing config");
        } else {
            config.save(&config_path)?;
        }

        Self::open(path)
    }

    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(HatecheckError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            ServiceConfig::load(&config_path)?
        } else {
            ServiceConfig::default()
        };

        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Preprocessor with the built-in and configured stopwords
    pub fn preprocessor(&self) -> Result<Preprocessor> {
        let stopwords = self.config.build_stopwords(&self.root)?;
        tracing::debug!(stopwords = stopwords.len(), "Stopword set built");
        Preprocessor::new(Arc::new(stopwords))
    }

    /// Service for account and metering operations
    pub fn into_service(self) -> Result<DetectionService> {
        let preprocessor = self.preprocessor()?;
        Ok(DetectionService::new(self.db, preprocessor)
            .with_password_cost(self.config.auth.password_cost))
    }

    /// Embedder and classifier described by the config
    pub fn load_models(&self) -> Result<(Box<dyn Embedder>, Box<dyn Classifier>)> {
        let embedder = HashingEmbedder::new(self.config.model.embedding_dim)?;
        let classifier = LinearClassifier::load(&self.config.classifier_path(&self.root))?;

        if classifier.dimension() != embedder.dimension() {
            return Err(HatecheckError::invalid_value(
                "classifier model",
                format!(
                    "expects {}-dimensional vectors but embedding_dim is {}",
                    classifier.dimension(),
                    embedder.dimension()
                ),
            ));
        }

        tracing::debug!(labels = classifier.labels().len(), "Classifier loaded");
        Ok((Box::new(embedder), Box::new(classifier)))
    }

    /// Service with the embedder and classifier loaded, for predictions
    pub fn into_detection_service(self) -> Result<DetectionService> {
        let (embedder, classifier) = self.load_models()?;
        Ok(self.into_service()?.with_models(embedder, classifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, ModelConfig};
    use crate::store::paths::DEFAULT_STORE_DIR;
    use tempfile::tempdir;

    fn write_model(dir: &Path, dim: usize) {
        let model = serde_json::json!({
            "labels": ["0", "1"],
            "weights": [vec![0.0; dim], vec![0.0; dim]],
            "bias": [1.0, 0.0],
        });
        fs::write(dir.join("model.json"), model.to_string()).unwrap();
    }

    #[test]
    fn test_init_creates_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_DIR);
        let store = Store::init(&path, ServiceConfig::default()).unwrap();

        assert!(path.join(CONFIG_FILE).exists());
        assert!(path.join(crate::db::DB_FILE).exists());
        assert_eq!(store.root(), path.as_path());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_DIR);
        let custom = ServiceConfig {
            model: ModelConfig {
                embedding_dim: 8,
                ..Default::default()
            },
            ..Default::default()
        };
        Store::init(&path, custom).unwrap();

        let reopened = Store::init(&path, ServiceConfig::default()).unwrap();
        assert_eq!(reopened.config().model.embedding_dim, 8);
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempdir().unwrap();
        Store::init(&dir.path().join(DEFAULT_STORE_DIR), ServiceConfig::default()).unwrap();

        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let store = Store::discover(&nested).unwrap();
        assert_eq!(store.root(), dir.path().join(DEFAULT_STORE_DIR).as_path());
    }

    #[test]
    fn test_discover_missing_store() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Store::discover(dir.path()),
            Err(HatecheckError::StoreNotFound { .. })
        ));
    }

    #[test]
    fn test_open_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Store::open(&dir.path().join("nope")),
            Err(HatecheckError::StoreNotFound { .. })
        ));
    }

    #[test]
    fn test_detection_service_requires_model() {
        let dir = tempdir().unwrap();
        let store = Store::init(dir.path(), ServiceConfig::default()).unwrap();
        assert!(matches!(
            store.into_detection_service(),
            Err(HatecheckError::NotFound { .. })
        ));
    }

    #[test]
    fn test_detection_service_checks_dimension() {
        let dir = tempdir().unwrap();
        write_model(dir.path(), 4);
        let store = Store::init(dir.path(), ServiceConfig::default()).unwrap();
        assert!(matches!(
            store.into_detection_service(),
            Err(HatecheckError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_detection_service_end_to_end() {
        let dir = tempdir().unwrap();
        write_model(dir.path(), 8);
        let config = ServiceConfig {
            model: ModelConfig {
                embedding_dim: 8,
                ..Default::default()
            },
            auth: AuthConfig { password_cost: 4 },
            ..Default::default()
        };
        let svc = Store::init(dir.path(), config)
            .unwrap()
            .into_detection_service()
            .unwrap();

        svc.register("alice", "a@example.com", "pw").unwrap();
        let token = svc.issue_token("alice", "pw").unwrap();
        let prediction = svc.predict(&token.access_token, "kuch bhi").unwrap();
        assert_eq!(prediction.prediction.as_str(), "0");
        assert_eq!(svc.request_count("alice").unwrap().request_count, 1);
    }

    #[test]
    fn test_service_hashes_with_configured_cost() {
        let dir = tempdir().unwrap();
        let config = ServiceConfig {
            auth: AuthConfig { password_cost: 5 },
            ..Default::default()
        };
        let svc = Store::init(dir.path(), config)
            .unwrap()
            .into_service()
            .unwrap();

        let user = svc.register("alice", "a@example.com", "pw").unwrap();
        assert!(user.hashed_password.contains("$05$"));
        assert!(svc.issue_token("alice", "pw").is_ok());
    }
}
