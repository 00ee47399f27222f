//! In-memory implementations of the waitlist store and mirror traits.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{MirrorRecord, WaitlistMirror, WaitlistRepo},
    entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum FailureMode {
    #[default]
    Healthy,
    /// Only `insert` fails, as if the database went away mid-request.
    Inserts,
    /// `insert` reports a unique violation, as if a concurrent signup won.
    ConflictOnInsert,
    /// Every operation fails.
    Everything,
}

/// In-memory implementation of `WaitlistRepo` with failure injection.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    failure: Mutex<FailureMode>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial entries for testing.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            failure: Mutex::new(FailureMode::Healthy),
        }
    }

    /// Get all entries in insertion order (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn fail_inserts(&self) {
        *self.failure.lock().unwrap() = FailureMode::Inserts;
    }

    pub fn conflict_on_insert(&self) {
        *self.failure.lock().unwrap() = FailureMode::ConflictOnInsert;
    }

    pub fn fail_everything(&self) {
        *self.failure.lock().unwrap() = FailureMode::Everything;
    }

    fn check_available(&self) -> AppResult<()> {
        if *self.failure.lock().unwrap() == FailureMode::Everything {
            return Err(AppError::BackendUnavailable(
                "in-memory store is switched off".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        match *self.failure.lock().unwrap() {
            FailureMode::Healthy => {}
            FailureMode::ConflictOnInsert => return Err(AppError::Conflict),
            FailureMode::Inserts | FailureMode::Everything => {
                return Err(AppError::BackendUnavailable("insert failed".into()));
            }
        }

        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|e| e.email == entry.email.as_str()) {
            return Err(AppError::Conflict);
        }

        let now = Utc::now();
        let stored = WaitlistEntry {
            id: Uuid::new_v4(),
            email: entry.email.as_str().to_string(),
            submitted_at: entry.submitted_at,
            source: entry.source.clone(),
            user_type: entry.user_type,
            created_at: now,
            updated_at: now,
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        self.check_available()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.check_available()?;
        let mut entries = self.get_all();
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.submitted_at.cmp(&a.submitted_at))
        });
        Ok(entries)
    }

    async fn count(&self) -> AppResult<u64> {
        self.check_available()?;
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    async fn delete(&self, email: &str) -> AppResult<()> {
        self.check_available()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.email != email);
        if entries.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Mirror that records every forwarded record.
#[derive(Default)]
pub struct RecordingMirror {
    records: Mutex<Vec<MirrorRecord>>,
}

impl RecordingMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MirrorRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Wait until at least `n` records arrived from detached tasks.
    pub async fn wait_for(&self, n: usize) -> Vec<MirrorRecord> {
        tokio::time::timeout(WAIT_TIMEOUT, async {
            loop {
                let records = self.records();
                if records.len() >= n {
                    return records;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("mirror records did not arrive in time")
    }
}

#[async_trait]
impl WaitlistMirror for RecordingMirror {
    async fn forward(&self, record: &MirrorRecord) -> AppResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Mirror whose endpoint always answers with an error.
#[derive(Default)]
pub struct FailingMirror {
    attempts: AtomicUsize,
}

impl FailingMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn wait_for_attempts(&self, n: usize) {
        tokio::time::timeout(WAIT_TIMEOUT, async {
            while self.attempts() < n {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("mirror was not called in time")
    }
}

#[async_trait]
impl WaitlistMirror for FailingMirror {
    async fn forward(&self, _record: &MirrorRecord) -> AppResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::MirrorFailure("HTTP status server error (500)".into()))
    }
}

/// Mirror that hangs until `release` is called, like a slow endpoint.
#[derive(Default)]
pub struct StalledMirror {
    started: AtomicUsize,
    release: Notify,
    delivered: Mutex<Vec<MirrorRecord>>,
}

impl StalledMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<MirrorRecord> {
        self.delivered.lock().unwrap().clone()
    }

    /// Let one pending (or the next) forward finish.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub async fn wait_for_delivery(&self, n: usize) -> Vec<MirrorRecord> {
        tokio::time::timeout(WAIT_TIMEOUT, async {
            loop {
                let delivered = self.delivered();
                if delivered.len() >= n {
                    return delivered;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("stalled mirror was never released")
    }
}

#[async_trait]
impl WaitlistMirror for StalledMirror {
    async fn forward(&self, record: &MirrorRecord) -> AppResult<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        self.delivered.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_new_entry;

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let repo = InMemoryWaitlistRepo::new();
        repo.insert(&create_test_new_entry("a@example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(&create_test_new_entry("A@Example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryWaitlistRepo::new();
        assert!(matches!(
            repo.delete("nobody@example.com").await.unwrap_err(),
            AppError::NotFound
        ));
    }

    #[tokio::test]
    async fn failure_modes() {
        let repo = InMemoryWaitlistRepo::new();
        repo.fail_inserts();
        assert!(repo.insert(&create_test_new_entry("a@example.com")).await.is_err());
        assert!(repo.list().await.is_ok());

        repo.fail_everything();
        assert!(matches!(
            repo.count().await.unwrap_err(),
            AppError::BackendUnavailable(_)
        ));
    }
}
