use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    entities::{
        signup_channel::SignupChannel,
        user_type::UserType,
        waitlist_email::WaitlistEmail,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
    validators::{is_valid_user_type, normalize_email},
};

pub const JOINED_MESSAGE: &str = "Thank you for joining our waitlist!";
pub const DUPLICATE_MESSAGE: &str = "You're already on our waitlist!";
pub const USER_TYPE_MESSAGE: &str = "Please tell us whether you are a patient, practitioner or gym";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Fails with `AppError::Conflict` when the email is already stored.
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;
    /// Newest first.
    async fn list(&self) -> AppResult<Vec<WaitlistEntry>>;
    async fn count(&self) -> AppResult<u64>;
    /// Fails with `AppError::NotFound` when nothing matched.
    async fn delete(&self, email: &str) -> AppResult<()>;
}

/// Secondary, best-effort notification target for new signups.
#[async_trait]
pub trait WaitlistMirror: Send + Sync {
    async fn forward(&self, record: &MirrorRecord) -> AppResult<()>;
}

/// Payload sent to the mirror endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorRecord {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl From<&WaitlistEntry> for MirrorRecord {
    fn from(entry: &WaitlistEntry) -> Self {
        Self {
            email: entry.email.clone(),
            timestamp: entry.submitted_at,
            source: entry.source.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignupPolicy {
    /// Website signups must carry a user type.
    pub require_user_type: bool,
    pub allowed_user_types: Vec<UserType>,
}

impl Default for SignupPolicy {
    fn default() -> Self {
        Self {
            require_user_type: false,
            allowed_user_types: UserType::ALL.to_vec(),
        }
    }
}

/// Result of a signup that passed validation. Storage problems never show up
/// here; they collapse into `SubscribeOutcome::accepted`.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WaitlistEntry>,
    pub duplicate: bool,
}

impl SubscribeOutcome {
    fn joined(entry: WaitlistEntry) -> Self {
        Self {
            success: true,
            message: JOINED_MESSAGE.to_string(),
            data: Some(entry),
            duplicate: false,
        }
    }

    fn duplicate(existing: Option<WaitlistEntry>) -> Self {
        Self {
            success: true,
            message: DUPLICATE_MESSAGE.to_string(),
            data: existing,
            duplicate: true,
        }
    }

    fn accepted() -> Self {
        Self {
            success: true,
            message: JOINED_MESSAGE.to_string(),
            data: None,
            duplicate: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WaitlistListing {
    pub entries: Vec<WaitlistEntry>,
    pub count: u64,
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    mirror: Option<Arc<dyn WaitlistMirror>>,
    policy: SignupPolicy,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        mirror: Option<Arc<dyn WaitlistMirror>>,
        policy: SignupPolicy,
    ) -> Self {
        Self {
            repo,
            mirror,
            policy,
        }
    }

    /// Add a signup to the waitlist.
    ///
    /// Only validation failures come back as `Err`. Everything after
    /// validation fails open: the caller gets a success response and the
    /// underlying error is logged.
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        raw_email: &str,
        raw_user_type: Option<&str>,
        channel: SignupChannel,
    ) -> AppResult<SubscribeOutcome> {
        let (email, user_type) = self.parse_signup(raw_email, raw_user_type, channel)?;

        match self.store_signup(email.clone(), user_type, channel).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(
                    error = ?err,
                    email = %email,
                    source = channel.source_label(),
                    "Failed to store waitlist signup, reporting success to the user"
                );
                Ok(SubscribeOutcome::accepted())
            }
        }
    }

    fn parse_signup(
        &self,
        raw_email: &str,
        raw_user_type: Option<&str>,
        channel: SignupChannel,
    ) -> AppResult<(WaitlistEmail, Option<UserType>)> {
        let email = WaitlistEmail::parse(raw_email).map_err(AppError::InvalidInput)?;

        let raw_user_type = raw_user_type.map(str::trim).filter(|s| !s.is_empty());
        let user_type = match raw_user_type {
            Some(raw) if is_valid_user_type(raw, &self.policy.allowed_user_types) => {
                raw.parse::<UserType>().ok()
            }
            Some(_) => return Err(AppError::InvalidInput(USER_TYPE_MESSAGE.into())),
            None if channel.collects_user_type() && self.policy.require_user_type => {
                return Err(AppError::InvalidInput(USER_TYPE_MESSAGE.into()));
            }
            None => None,
        };

        Ok((email, user_type))
    }

    async fn store_signup(
        &self,
        email: WaitlistEmail,
        user_type: Option<UserType>,
        channel: SignupChannel,
    ) -> AppResult<SubscribeOutcome> {
        if let Some(existing) = self.repo.find_by_email(email.as_str()).await? {
            info!(email = %email, "Signup is already on the waitlist");
            return Ok(SubscribeOutcome::duplicate(Some(existing)));
        }

        let new_entry = NewWaitlistEntry {
            email,
            submitted_at: Utc::now(),
            source: channel.source_label().to_string(),
            user_type,
        };

        let entry = match self.repo.insert(&new_entry).await {
            Ok(entry) => entry,
            // A concurrent signup with the same email won the insert.
            Err(AppError::Conflict) => {
                info!(email = %new_entry.email, "Signup lost the insert race, treating as duplicate");
                return Ok(SubscribeOutcome::duplicate(None));
            }
            Err(err) => return Err(err),
        };

        info!(email = %entry.email, source = %entry.source, "New waitlist signup");
        self.spawn_mirror(&entry);

        Ok(SubscribeOutcome::joined(entry))
    }

    /// Forward a fresh entry to the mirror without holding up the response.
    fn spawn_mirror(&self, entry: &WaitlistEntry) {
        let Some(mirror) = self.mirror.clone() else {
            return;
        };
        let record = MirrorRecord::from(entry);

        tokio::spawn(async move {
            match mirror.forward(&record).await {
                Ok(()) => debug!(email = %record.email, "Mirrored waitlist signup"),
                Err(err) => {
                    warn!(error = ?err, email = %record.email, "Failed to mirror waitlist signup")
                }
            }
        });
    }

    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> AppResult<WaitlistListing> {
        let entries = self.repo.list().await?;
        Ok(WaitlistListing {
            count: entries.len() as u64,
            entries,
        })
    }

    /// Informational only; store failures read as zero.
    #[instrument(skip(self))]
    pub async fn count_entries(&self) -> u64 {
        match self.repo.count().await {
            Ok(count) => count,
            Err(err) => {
                warn!(error = ?err, "Failed to count waitlist entries");
                0
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_entry(&self, raw_email: &str) -> AppResult<()> {
        let email = normalize_email(raw_email);
        if email.is_empty() {
            return Err(AppError::InvalidInput(EMAIL_REQUIRED_MESSAGE.into()));
        }

        self.repo.delete(&email).await?;
        info!(email = %email, "Removed waitlist entry");
        Ok(())
    }

    /// Send a single email straight to the mirror endpoint. Unlike the
    /// signup path, failures here are reported to the caller.
    #[instrument(skip(self))]
    pub async fn forward_to_mirror(&self, raw_email: &str) -> AppResult<()> {
        if raw_email.trim().is_empty() {
            return Err(AppError::InvalidInput(EMAIL_REQUIRED_MESSAGE.into()));
        }
        let email = WaitlistEmail::parse(raw_email).map_err(AppError::InvalidInput)?;

        let Some(mirror) = &self.mirror else {
            error!("GOOGLE_SCRIPT_URL is not set, cannot forward to the mirror");
            return Err(AppError::MirrorNotConfigured);
        };

        let record = MirrorRecord {
            email: email.into_inner(),
            timestamp: Utc::now(),
            source: SignupChannel::Api.source_label().to_string(),
        };
        mirror.forward(&record).await?;

        info!(email = %record.email, "Forwarded email to the mirror");
        Ok(())
    }
}
