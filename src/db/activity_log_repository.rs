// src/db/activity_log_repository.rs
// DOCUMENTATION: Activity log database operations
// PURPOSE: Append and read audit entries

use crate::errors::SchoolError;
use crate::models::{ActivityLog, NewActivity};
use sqlx::MySqlPool;

const LABEL: &str = "Activity log";

pub struct ActivityLogRepository;

impl ActivityLogRepository {
    pub async fn insert(pool: &MySqlPool, entry: &NewActivity) -> Result<u64, SchoolError> {
        let result = sqlx::query(
            r#"
            INSERT INTO activity_logs (activity_type, description, performed_by, created_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(&entry.activity_type)
        .bind(&entry.description)
        .bind(&entry.performed_by)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to record activity", LABEL, e))?;

        Ok(result.last_insert_id())
    }

    /// Most recent entries first
    pub async fn recent(pool: &MySqlPool, limit: u32) -> Result<Vec<ActivityLog>, SchoolError> {
        sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT id, activity_type, description, performed_by, created_at
            FROM activity_logs
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to fetch activity logs", LABEL, e))
    }
}
