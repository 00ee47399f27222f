use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

/// Store used when no `DATABASE_URL` is configured. Every operation fails
/// with `BackendUnavailable`; the signup path still answers with success.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredWaitlistRepo;

impl UnconfiguredWaitlistRepo {
    fn unavailable<T>() -> AppResult<T> {
        Err(AppError::BackendUnavailable(
            "DATABASE_URL is not configured".into(),
        ))
    }
}

#[async_trait]
impl WaitlistRepo for UnconfiguredWaitlistRepo {
    async fn insert(&self, _entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        Self::unavailable()
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<WaitlistEntry>> {
        Self::unavailable()
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        Self::unavailable()
    }

    async fn count(&self) -> AppResult<u64> {
        Self::unavailable()
    }

    async fn delete(&self, _email: &str) -> AppResult<()> {
        Self::unavailable()
    }
}
