// src/models/dashboard.rs

use serde::Serialize;
use serde_json::{Map, Value};

use super::ActivityLog;

/// Admin dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Aggregate counts plus the active school year label, keyed by column name
    pub totals: Map<String, Value>,
    pub recent_activities: Vec<ActivityLog>,
}
