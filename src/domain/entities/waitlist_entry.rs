use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{user_type::UserType, waitlist_email::WaitlistEmail};

/// A waitlist signup as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    /// Moment the signup was submitted.
    #[serde(rename = "timestamp")]
    pub submitted_at: DateTime<Utc>,
    pub source: String,
    #[serde(
        rename = "userType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_type: Option<UserType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a new entry. Store-assigned fields
/// (`id`, `created_at`, `updated_at`) are absent.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub email: WaitlistEmail,
    pub submitted_at: DateTime<Utc>,
    pub source: String,
    pub user_type: Option<UserType>,
}
