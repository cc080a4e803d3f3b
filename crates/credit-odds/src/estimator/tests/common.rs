use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::SessionConfig;
use crate::estimator::domain::{AnswerSet, FactorKey};
use crate::estimator::rules::RuleTable;
use crate::estimator::session::{
    QuestionnaireService, RepositoryError, SessionId, SessionRecord, SessionRepository,
};

pub(super) fn answers(pairs: &[(FactorKey, &str)]) -> AnswerSet {
    pairs
        .iter()
        .map(|(key, value)| (*key, value.to_string()))
        .collect()
}

/// Highest-weighted option for every factor.
pub(super) fn best_answers(table: &RuleTable) -> AnswerSet {
    table
        .factors
        .iter()
        .map(|factor| {
            let best = factor
                .options
                .iter()
                .max_by_key(|option| option.points)
                .expect("factor has options");
            (factor.key, best.value.to_string())
        })
        .collect()
}

/// Lowest-weighted option for every factor.
pub(super) fn worst_answers(table: &RuleTable) -> AnswerSet {
    table
        .factors
        .iter()
        .map(|factor| {
            let worst = factor
                .options
                .iter()
                .min_by_key(|option| option.points)
                .expect("factor has options");
            (factor.key, worst.value.to_string())
        })
        .collect()
}

pub(super) fn session_config() -> SessionConfig {
    SessionConfig {
        ttl_minutes: 30,
        max_sessions: 8,
    }
}

pub(super) fn build_service() -> (QuestionnaireService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with_capacity(session_config().max_sessions));
    let service = QuestionnaireService::new(repository.clone(), session_config());
    (service, repository)
}

#[derive(Clone)]
pub(super) struct MemoryRepository {
    capacity: usize,
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemoryRepository {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Arc::default(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    pub(super) fn backdate(&self, id: &SessionId, updated_at: DateTime<Utc>) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(record) = guard.get_mut(id) {
            record.updated_at = updated_at;
        }
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        if guard.len() >= self.capacity {
            return Err(RepositoryError::CapacityReached(self.capacity));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn modify<F, E>(&self, id: &SessionId, step: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&mut SessionRecord) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut draft = stored.clone();
        step(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.remove(id).is_some())
    }

    fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| record.updated_at >= cutoff);
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn modify<F, E>(&self, _id: &SessionId, _step: F) -> Result<SessionRecord, E>
    where
        F: FnOnce(&mut SessionRecord) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("store offline".to_string()).into())
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn purge_idle(&self, _cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
