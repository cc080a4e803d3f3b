use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, Factor, FactorKey, FactorOption, ProductType};
use super::flow::{FlowError, FlowProgress, QuestionnaireFlow};
use super::{ApprovalEstimate, Estimator};
use crate::config::SessionConfig;

/// Identifier wrapper for questionnaire sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("qs-{id:06}"))
}

/// Stored questionnaire together with its activity timestamps.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub flow: QuestionnaireFlow,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn view(&self) -> SessionView {
        let flow = &self.flow;
        let product = flow.product();

        SessionView {
            session_id: self.id.clone(),
            state: flow.state().label(),
            product,
            product_label: product.map(ProductType::label),
            progress: flow.progress(),
            current_factor: flow.current_factor().map(|factor| FactorView {
                factor,
                selected: flow.current_answer().map(str::to_string),
            }),
            can_advance: flow.can_advance(),
            answers: flow.answers().clone(),
            result: flow.estimate().cloned(),
            started_at: self.started_at,
            updated_at: self.updated_at,
        }
    }
}

/// Public JSON view of a questionnaire session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_label: Option<&'static str>,
    pub progress: FlowProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_factor: Option<FactorView>,
    pub can_advance: bool,
    pub answers: AnswerSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ApprovalEstimate>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question shown on the current screen along with the recorded answer.
#[derive(Debug, Clone, Serialize)]
pub struct FactorView {
    #[serde(flatten)]
    pub factor: &'static Factor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl FactorView {
    pub fn key(&self) -> FactorKey {
        self.factor.key
    }

    pub fn options(&self) -> &'static [FactorOption] {
        self.factor.options
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    /// Applies `step` to a copy of the stored record while holding the store
    /// exclusively, and persists the copy only when `step` succeeds.
    fn modify<F, E>(&self, id: &SessionId, step: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&mut SessionRecord) -> Result<(), E>,
        E: From<RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError>;
    /// Drops sessions whose last activity is older than `cutoff`.
    fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session capacity of {0} reached")]
    CapacityReached(usize),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by the questionnaire service.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireServiceError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing the estimator with a session repository.
pub struct QuestionnaireService<R> {
    repository: Arc<R>,
    estimator: Estimator,
    idle_ttl: Duration,
}

impl<R> QuestionnaireService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: SessionConfig) -> Self {
        Self {
            repository,
            estimator: Estimator::new(),
            idle_ttl: config.idle_ttl(),
        }
    }

    /// Opens a session, optionally jumping straight to the first factor.
    pub fn start(
        &self,
        product_key: Option<&str>,
    ) -> Result<SessionView, QuestionnaireServiceError> {
        let mut flow = QuestionnaireFlow::with_estimator(self.estimator);
        if let Some(key) = product_key {
            flow.select_product_key(key)?;
        }

        let now = Utc::now();
        let record = SessionRecord {
            id: next_session_id(),
            flow,
            started_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        tracing::debug!(session = %stored.id.0, product = ?stored.flow.product(), "questionnaire session opened");
        Ok(stored.view())
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record.view())
    }

    pub fn select_product(
        &self,
        id: &SessionId,
        product_key: &str,
    ) -> Result<SessionView, QuestionnaireServiceError> {
        self.apply(id, |flow| flow.select_product_key(product_key).map(drop))
    }

    pub fn answer(
        &self,
        id: &SessionId,
        value: &str,
    ) -> Result<SessionView, QuestionnaireServiceError> {
        self.apply(id, |flow| flow.select_option(value).map(drop))
    }

    pub fn next(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        self.apply(id, |flow| flow.next().map(drop))
    }

    pub fn back(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        self.apply(id, |flow| flow.back().map(drop))
    }

    pub fn restart(&self, id: &SessionId) -> Result<SessionView, QuestionnaireServiceError> {
        self.apply(id, |flow| {
            flow.restart();
            Ok(())
        })
    }

    pub fn discard(&self, id: &SessionId) -> Result<(), QuestionnaireServiceError> {
        if self.repository.remove(id)? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound.into())
        }
    }

    /// Removes sessions idle for longer than the configured TTL.
    pub fn purge_idle(&self, now: DateTime<Utc>) -> Result<usize, QuestionnaireServiceError> {
        let cutoff = now
            .checked_sub_signed(self.idle_ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let purged = self.repository.purge_idle(cutoff)?;
        if purged > 0 {
            tracing::info!(purged, "expired idle questionnaire sessions");
        }
        Ok(purged)
    }

    /// One-shot estimate without a session. Unknown product keys score
    /// against the credit card table; unknown factor keys are ignored.
    pub fn estimate(&self, product_key: &str, answers: &AnswerSet) -> ApprovalEstimate {
        self.estimator.estimate_key(product_key, answers)
    }

    fn apply<F>(&self, id: &SessionId, step: F) -> Result<SessionView, QuestionnaireServiceError>
    where
        F: FnOnce(&mut QuestionnaireFlow) -> Result<(), FlowError>,
    {
        let record = self.repository.modify(
            id,
            |record: &mut SessionRecord| -> Result<(), QuestionnaireServiceError> {
                step(&mut record.flow)?;
                record.updated_at = Utc::now();
                Ok(())
            },
        )?;
        Ok(record.view())
    }
}
