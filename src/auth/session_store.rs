//! Session storage in the application database.
//!
//! Sessions live in the `sessions` table next to users and notes, so they
//! survive restarts and can be shared by several routers on one file.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use time::OffsetDateTime;
use tower_sessions::SessionStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion};

use crate::store::{SessionRepository, SqliteStore, StoreResult};

/// A [`SessionStore`] writing session records as JSON into SQLite.
#[derive(Clone)]
pub struct SqliteSessionStore {
    store: Arc<Mutex<SqliteStore>>,
}

impl SqliteSessionStore {
    pub fn new(store: Arc<Mutex<SqliteStore>>) -> Self {
        Self { store }
    }

    /// Deletes expired sessions every `period` until the task is dropped.
    pub async fn continuously_delete_expired(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(err) = self.delete_expired().await {
                warn!("failed to delete expired sessions: {}", err);
            }
        }
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> StoreResult<T>,
    ) -> session_store::Result<T> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| session_store::Error::Backend("store mutex poisoned".to_string()))?;
        f(&mut store).map_err(|e| session_store::Error::Backend(e.to_string()))
    }
}

impl fmt::Debug for SqliteSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSessionStore").finish_non_exhaustive()
    }
}

fn to_utc(at: OffsetDateTime) -> session_store::Result<DateTime<Utc>> {
    DateTime::from_timestamp(at.unix_timestamp(), at.nanosecond())
        .ok_or_else(|| session_store::Error::Encode(format!("expiry out of range: {}", at)))
}

fn encode(record: &Record) -> session_store::Result<(String, String, DateTime<Utc>)> {
    let data =
        serde_json::to_string(record).map_err(|e| session_store::Error::Encode(e.to_string()))?;
    Ok((record.id.to_string(), data, to_utc(record.expiry_date)?))
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let (id, data, expires) = encode(record)?;
            if self.with_store(|store| store.insert_session(&id, &data, expires))? {
                return Ok(());
            }
            debug!("session id collision, regenerating");
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let (id, data, expires) = encode(record)?;
        self.with_store(|store| store.save_session(&id, &data, expires))
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let id = session_id.to_string();
        let Some(data) = self.with_store(|store| store.load_session(&id, Utc::now()))? else {
            return Ok(None);
        };
        let record =
            serde_json::from_str(&data).map_err(|e| session_store::Error::Decode(e.to_string()))?;
        Ok(Some(record))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let id = session_id.to_string();
        self.with_store(|store| store.delete_session(&id))?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SqliteSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let deleted = self.with_store(|store| store.delete_expired_sessions(Utc::now()))?;
        if deleted > 0 {
            debug!("deleted {} expired sessions", deleted);
        }
        Ok(())
    }
}
