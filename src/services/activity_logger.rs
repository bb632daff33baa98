// src/services/activity_logger.rs
// DOCUMENTATION: Audit trail for admin mutations
// PURPOSE: Build activity descriptions and write them to activity_logs

use crate::db::ActivityLogRepository;
use crate::errors::SchoolError;
use crate::models::{ActivityLog, GradeLevel, NewActivity, SchoolYear, Semester, Subject};
use actix_web::HttpRequest;
use sqlx::MySqlPool;

/// Actor recorded when the request does not name one
pub const DEFAULT_ACTOR: &str = "Administrator";

const ACTOR_HEADER: &str = "X-Actor";
const MAX_ACTOR_LEN: usize = 100;

/// Kind of change being audited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Activate,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Activate => "activate",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Action::Create => "Created",
            Action::Update => "Updated",
            Action::Delete => "Deleted",
            Action::Activate => "Activated",
        }
    }
}

/// Records that can appear in the activity log
pub trait Audited {
    /// Entity key used in activity_type, e.g. "school_year"
    const ENTITY: &'static str;
    /// Human readable entity name, e.g. "school year"
    const ENTITY_NAME: &'static str;

    fn audit_label(&self) -> String;
}

impl Audited for SchoolYear {
    const ENTITY: &'static str = "school_year";
    const ENTITY_NAME: &'static str = "school year";

    fn audit_label(&self) -> String {
        self.year_label.clone()
    }
}

impl Audited for Semester {
    const ENTITY: &'static str = "semester";
    const ENTITY_NAME: &'static str = "semester";

    fn audit_label(&self) -> String {
        match &self.year_label {
            Some(year) => format!("{} ({})", self.semester_name, year),
            None => self.semester_name.clone(),
        }
    }
}

impl Audited for Subject {
    const ENTITY: &'static str = "subject";
    const ENTITY_NAME: &'static str = "subject";

    fn audit_label(&self) -> String {
        format!("{} - {}", self.subject_code, self.subject_name)
    }
}

impl Audited for GradeLevel {
    const ENTITY: &'static str = "grade_level";
    const ENTITY_NAME: &'static str = "grade level";

    fn audit_label(&self) -> String {
        self.level_name.clone()
    }
}

/// Build the entry for a create, delete or activate
pub fn describe<T: Audited>(action: Action, record: &T, actor: &str) -> NewActivity {
    NewActivity {
        activity_type: format!("{}_{}", action.as_str(), T::ENTITY),
        description: format!(
            "{} {} \"{}\"",
            action.past_tense(),
            T::ENTITY_NAME,
            record.audit_label()
        ),
        performed_by: actor.to_string(),
    }
}

/// Build the entry for an update, naming the record as it was before the change
pub fn describe_update<T: Audited>(before: &T, after: &T, actor: &str) -> NewActivity {
    let mut entry = describe(Action::Update, before, actor);
    let (old_label, new_label) = (before.audit_label(), after.audit_label());
    if old_label != new_label {
        entry.description = format!("{} (now \"{}\")", entry.description, new_label);
    }
    entry
}

/// Actor named by the X-Actor header, or the default
pub fn actor_from_request(req: &HttpRequest) -> String {
    req.headers()
        .get(ACTOR_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .map(|actor| actor.chars().take(MAX_ACTOR_LEN).collect())
        .unwrap_or_else(|| DEFAULT_ACTOR.to_string())
}

pub struct ActivityLogger;

impl ActivityLogger {
    /// Write an entry
    /// DOCUMENTATION: The mutation already succeeded, so a failed write is only logged
    pub async fn record(pool: &MySqlPool, entry: NewActivity) {
        match ActivityLogRepository::insert(pool, &entry).await {
            Ok(_) => log::debug!("Recorded activity {}: {}", entry.activity_type, entry.description),
            Err(e) => log::warn!(
                "Could not record activity {} ({}): {}",
                entry.activity_type,
                entry.description,
                e
            ),
        }
    }

    pub async fn recent(pool: &MySqlPool, limit: u32) -> Result<Vec<ActivityLog>, SchoolError> {
        ActivityLogRepository::recent(pool, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::NaiveDate;

    fn subject(code: &str, name: &str) -> Subject {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Subject {
            id: 7,
            subject_code: code.to_string(),
            subject_name: name.to_string(),
            description: None,
            grade_level_id: None,
            created_at: now,
            updated_at: now,
            level_name: None,
        }
    }

    #[test]
    fn test_describe_delete() {
        let entry = describe(Action::Delete, &subject("MATH7", "Mathematics 7"), "registrar");

        assert_eq!(entry.activity_type, "delete_subject");
        assert_eq!(entry.description, "Deleted subject \"MATH7 - Mathematics 7\"");
        assert_eq!(entry.performed_by, "registrar");
    }

    #[test]
    fn test_describe_update_mentions_rename() {
        let before = subject("MATH7", "Mathematics 7");
        let after = subject("MATH7", "Math 7");
        let entry = describe_update(&before, &after, DEFAULT_ACTOR);

        assert_eq!(entry.activity_type, "update_subject");
        assert_eq!(
            entry.description,
            "Updated subject \"MATH7 - Mathematics 7\" (now \"MATH7 - Math 7\")"
        );
    }

    #[test]
    fn test_describe_update_without_rename() {
        let before = subject("SCI8", "Science 8");
        let entry = describe_update(&before, &before.clone(), DEFAULT_ACTOR);
        assert_eq!(entry.description, "Updated subject \"SCI8 - Science 8\"");
    }

    #[test]
    fn test_semester_label_includes_year() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let semester = Semester {
            id: 1,
            school_year_id: 2,
            semester_name: "First Semester".to_string(),
            start_date: day,
            end_date: day,
            is_active: false,
            created_at: day.and_hms_opt(0, 0, 0).unwrap(),
            updated_at: day.and_hms_opt(0, 0, 0).unwrap(),
            year_label: Some("2024-2025".to_string()),
        };
        assert_eq!(semester.audit_label(), "First Semester (2024-2025)");
    }

    #[actix_rt::test]
    async fn test_actor_from_request() {
        let req = TestRequest::default()
            .insert_header((ACTOR_HEADER, "  principal  "))
            .to_http_request();
        assert_eq!(actor_from_request(&req), "principal");

        let req = TestRequest::default().insert_header((ACTOR_HEADER, "")).to_http_request();
        assert_eq!(actor_from_request(&req), DEFAULT_ACTOR);

        let req = TestRequest::default().to_http_request();
        assert_eq!(actor_from_request(&req), DEFAULT_ACTOR);
    }
}
