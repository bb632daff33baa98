// src/services/dashboard_service.rs
// DOCUMENTATION: Admin dashboard aggregation
// PURPOSE: Collect counts and recent activity in as few round trips as possible

use crate::config::ConnectionPool;
use crate::errors::SchoolError;
use crate::models::DashboardSummary;
use crate::services::ActivityLogger;
use serde_json::{json, Map};

/// Entries shown in the dashboard activity feed
const RECENT_ACTIVITY_COUNT: u32 = 5;

const SUMMARY_SQL: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM users WHERE role = ?) AS total_students,
        (SELECT COUNT(*) FROM users WHERE role = ?) AS total_teachers,
        (SELECT COUNT(*) FROM users WHERE role = ?) AS total_instructors,
        (SELECT COUNT(*) FROM subjects) AS total_subjects,
        (SELECT COUNT(*) FROM grade_levels) AS total_grade_levels,
        (SELECT COUNT(*) FROM semesters) AS total_semesters,
        (SELECT COUNT(*) FROM school_years) AS total_school_years,
        (SELECT year_label FROM school_years WHERE is_active = TRUE LIMIT 1) AS active_school_year
"#;

pub struct DashboardService;

impl DashboardService {
    pub async fn summary(pool: &ConnectionPool) -> Result<DashboardSummary, SchoolError> {
        let rows = pool
            .execute(
                SUMMARY_SQL,
                &[json!("student"), json!("teacher"), json!("instructor")],
            )
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to load dashboard summary", "Dashboard", e))?;

        let totals = rows.into_iter().next().unwrap_or_else(Map::new);
        let recent_activities = ActivityLogger::recent(pool.inner(), RECENT_ACTIVITY_COUNT).await?;

        Ok(DashboardSummary {
            totals,
            recent_activities,
        })
    }
}
