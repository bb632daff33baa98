// src/models/activity_log.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Audit trail entry for an admin action
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: i32,
    /// `<action>_<entity>`, e.g. "delete_subject"
    pub activity_type: String,
    pub description: String,
    pub performed_by: String,
    pub created_at: NaiveDateTime,
}

/// Entry to be written by the activity logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub activity_type: String,
    pub description: String,
    pub performed_by: String,
}

/// Query parameters for GET /api/admin/activity-logs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityLogQuery {
    pub limit: Option<u32>,
}
