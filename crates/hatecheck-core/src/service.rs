//! Detection service: accounts, tokens, metered predictions

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::auth::{self, AccessToken, DEFAULT_PASSWORD_COST};
use crate::db::{Database, User};
use crate::error::{HatecheckError, Result};
use crate::model::{Classifier, Embedder, Label};
use crate::text::Preprocessor;
use crate::trace_time;

/// Message returned by the index endpoint
pub const INDEX_MESSAGE: &str = "This is the homepage of the API ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub prediction: Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCount {
    pub username: String,
    pub request_count: i64,
}

struct Models {
    embedder: Box<dyn Embedder>,
    classifier: Box<dyn Classifier>,
}

/// Everything a request needs, constructed once and passed in
pub struct DetectionService {
    db: Database,
    preprocessor: Preprocessor,
    models: Option<Models>,
    password_cost: u32,
}

impl DetectionService {
    /// Service without models: accounts and metering only
    pub fn new(db: Database, preprocessor: Preprocessor) -> Self {
        DetectionService {
            db,
            preprocessor,
            models: None,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }

    /// bcrypt cost used for passwords registered through this service
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Attach the embedder and classifier used by [`DetectionService::predict`]
    pub fn with_models(mut self, embedder: Box<dyn Embedder>, classifier: Box<dyn Classifier>) -> Self {
        self.models = Some(Models {
            embedder,
            classifier,
        });
        self
    }

    pub fn index() -> IndexMessage {
        info!("Index endpoint accessed");
        IndexMessage {
            message: INDEX_MESSAGE.to_string(),
        }
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        info!("Registration endpoint accessed");

        if username.trim().is_empty() {
            return Err(HatecheckError::UsageError(
                "username must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(HatecheckError::UsageError(
                "password must not be empty".to_string(),
            ));
        }

        if self.db.find_user(username)?.is_some() {
            warn!(username, "Registration failed: username already exists");
            return Err(HatecheckError::already_exists("user", username));
        }

        let hashed = auth::hash_password(password, self.password_cost)?;
        let user = self.db.create_user(username, email, &hashed)?;
        info!(username, "User registered successfully");
        Ok(user)
    }

    /// Exchange username and password for a bearer token
    pub fn issue_token(&self, username: &str, password: &str) -> Result<AccessToken> {
        info!("Token (login) endpoint accessed");

        let verified = self
            .db
            .find_user(username)?
            .is_some_and(|user| auth::verify_password(password, &user.hashed_password));

        if !verified {
            warn!(username, "Failed login attempt");
            return Err(HatecheckError::InvalidCredentials);
        }

        info!(username, "User authenticated, issuing access token");
        auth::issue_token(&self.db.token_secret()?, username)
    }

    /// Resolve a bearer token to its user
    pub fn authenticate(&self, token: &str) -> Result<User> {
        let secret = self.db.token_secret()?;
        let Some(username) = auth::verify_token(&secret, token) else {
            debug!("Rejected malformed or forged token");
            return Err(HatecheckError::InvalidCredentials);
        };

        self.db
            .find_user(&username)?
            .ok_or(HatecheckError::InvalidCredentials)
    }

    /// Classify `text` on behalf of the token's user and meter the call
    pub fn predict(&self, token: &str, text: &str) -> Result<Prediction> {
        let user = self.authenticate(token)?;
        self.predict_for(&user, text)
    }

    /// Classify `text` for an already authenticated user and meter the call
    pub fn predict_for(&self, user: &User, text: &str) -> Result<Prediction> {
        info!("Prediction endpoint accessed");

        let models = self.models.as_ref().ok_or_else(|| {
            HatecheckError::UsageError("no classifier model loaded".to_string())
        })?;

        let start = Instant::now();
        debug!(text, "Received text for prediction");

        let preprocessed = self.preprocessor.preprocess_main(text);
        debug!(preprocessed = %preprocessed, "Preprocessed text");

        let vector = models.embedder.embed(&preprocessed);
        let label = models.classifier.predict(&vector)?;
        trace_time!(start, "predict", dimension = vector.len());

        // Metering failures are logged but do not fail the prediction
        match self.db.increment_request_count(&user.username) {
            Ok(count) => info!(
                username = %user.username,
                request_count = count,
                "Request count incremented"
            ),
            Err(e) => error!(
                username = %user.username,
                error = %e,
                "Error updating request count"
            ),
        }

        info!(prediction = %label, "Prediction complete");
        Ok(Prediction { prediction: label })
    }

    pub fn request_count(&self, username: &str) -> Result<RequestCount> {
        info!(username, "Request count endpoint accessed");

        let user = self.db.find_user(username)?.ok_or_else(|| {
            warn!(username, "User not found");
            HatecheckError::not_found("user", username)
        })?;

        Ok(RequestCount {
            username: user.username,
            request_count: user.request_count,
        })
    }
}
