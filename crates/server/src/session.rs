//! Per-session state.
//!
//! Every visitor gets their own `Session`, which owns a freshly trained
//! `Recommender`. Nothing model-related is shared between sessions: the
//! store only maps ids to sessions, and its lock is released before any
//! model is queried.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use anyhow::Context;
use catalog::{FeatureRow, MovieFeatures};
use recommender::{ForestConfig, ModelInfo, Prediction, Recommender, RecommenderError, TrainingReport};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::AppError;

/// One user's isolated state: a trained model and its training report.
#[derive(Debug)]
pub struct Session {
    id: String,
    recommender: Recommender,
    report: TrainingReport,
}

impl Session {
    /// Create a session and train its model.
    ///
    /// Training is CPU-bound; async callers should run this on a blocking
    /// thread (see [`SessionStore::create`]).
    pub fn start(config: ForestConfig) -> Result<Self, RecommenderError> {
        let mut recommender = Recommender::new(config);
        let report = recommender.train()?;
        Ok(Self {
            id: new_session_id(),
            recommender,
            report,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn model_info(&self) -> ModelInfo {
        self.recommender.model_info()
    }

    /// Predict for a selection made through the form.
    pub fn predict(&self, features: &MovieFeatures) -> Result<Prediction, RecommenderError> {
        self.recommender.predict_features(features)
    }

    /// Predict for raw codes, passed through unchecked.
    pub fn predict_codes(&self, row: FeatureRow) -> Result<Prediction, RecommenderError> {
        let [genre, age_rating, length, era, user_rating] = row;
        self.recommender
            .predict(genre, age_rating, length, era, user_rating)
    }
}

fn new_session_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<String, Arc<Session>>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

/// Maps session ids to sessions, evicting the oldest when full.
///
/// Cloning is cheap: clones share the same map.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    config: ForestConfig,
    max_sessions: usize,
}

impl SessionStore {
    /// Default cap on live sessions
    pub const DEFAULT_MAX_SESSIONS: usize = 1024;

    pub fn new(config: ForestConfig, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Sessions::default())),
            config,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start and register a new session.
    pub async fn create(&self) -> Result<Arc<Session>, AppError> {
        let config = self.config.clone();
        let session = tokio::task::spawn_blocking(move || Session::start(config))
            .await
            .context("Training task failed")??;
        let session = Arc::new(session);

        let mut sessions = self.inner.write().await;
        while sessions.by_id.len() >= self.max_sessions {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            sessions.by_id.remove(&oldest);
            warn!("Session limit {} reached, evicted session {}", self.max_sessions, oldest);
        }
        sessions.order.push_back(session.id().to_string());
        sessions
            .by_id
            .insert(session.id().to_string(), session.clone());

        info!(
            "Started session {} (accuracy {:.1}%)",
            session.id(),
            session.report().accuracy * 100.0
        );
        Ok(session)
    }

    /// Look up a live session.
    pub async fn get(&self, id: &str) -> Result<Arc<Session>, AppError> {
        self.inner
            .read()
            .await
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(ForestConfig::default(), Self::DEFAULT_MAX_SESSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ForestConfig {
        ForestConfig::default().with_estimators(10)
    }

    #[test]
    fn test_session_starts_trained() {
        let session = Session::start(small_config()).unwrap();
        assert_eq!(session.id().len(), 16);
        assert_eq!(session.report().total, 20);
        assert!(session.predict(&MovieFeatures::default()).is_ok());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = Session::start(small_config()).unwrap();
        let b = Session::start(small_config()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(small_config(), 4);
        assert!(store.is_empty().await);

        let session = store.create().await.unwrap();
        let found = store.get(session.id()).await.unwrap();
        assert!(Arc::ptr_eq(&session, &found));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(small_config(), 4);
        assert!(matches!(
            store.get("missing").await,
            Err(AppError::SessionNotFound(id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_oldest_session_is_evicted() {
        let store = SessionStore::new(small_config(), 2);
        let first = store.create().await.unwrap();
        let second = store.create().await.unwrap();
        let third = store.create().await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.get(first.id()).await.is_err());
        assert!(store.get(second.id()).await.is_ok());
        assert!(store.get(third.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_models() {
        let store = SessionStore::new(small_config(), 4);
        let a = store.create().await.unwrap();
        let b = store.create().await.unwrap();

        // Same seed, separate instances: identical answers, no shared state
        let features = MovieFeatures::default();
        assert_eq!(a.predict(&features).unwrap(), b.predict(&features).unwrap());
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
