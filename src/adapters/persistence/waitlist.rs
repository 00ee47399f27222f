use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let id = Uuid::new_v4();
        let rec = sqlx::query_as::<_, WaitlistEntry>(
            r#"INSERT INTO waitlist_entries (id, email, submitted_at, source, user_type)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, email, submitted_at, source, user_type, created_at, updated_at"#,
        )
        .bind(id)
        .bind(entry.email.as_str())
        .bind(entry.submitted_at)
        .bind(&entry.source)
        .bind(entry.user_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let rec = sqlx::query_as::<_, WaitlistEntry>(
            r#"SELECT id, email, submitted_at, source, user_type, created_at, updated_at
               FROM waitlist_entries
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        let recs = sqlx::query_as::<_, WaitlistEntry>(
            r#"SELECT id, email, submitted_at, source, user_type, created_at, updated_at
               FROM waitlist_entries
               ORDER BY created_at DESC, submitted_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM waitlist_entries"#)
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(total).map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn delete(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query(r#"DELETE FROM waitlist_entries WHERE email = $1"#)
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
