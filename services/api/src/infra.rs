use chrono::{DateTime, Utc};
use credit_odds::estimator::{RepositoryError, SessionId, SessionRecord, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store bounded by `capacity`.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    capacity: usize,
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionRepository {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Arc::default(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let stored = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut draft = stored.clone();
        step(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id).is_some())
    }

    fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, record| record.updated_at >= cutoff);
        Ok(before - guard.len())
    }
}
