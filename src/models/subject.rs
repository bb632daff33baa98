// src/models/subject.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i32,
    /// Unique short code, e.g. "MATH7"
    pub subject_code: String,
    pub subject_name: String,
    pub description: Option<String>,
    pub grade_level_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Name of the grade level the subject belongs to (joined)
    #[sqlx(default)]
    pub level_name: Option<String>,
}

/// Body of POST and PUT /api/subjects
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubjectRequest {
    #[validate(length(min = 1, max = 20))]
    pub subject_code: String,
    #[validate(length(min = 1, max = 100))]
    pub subject_name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub grade_level_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_request_limits() {
        let mut req = SubjectRequest {
            subject_code: "MATH7".to_string(),
            subject_name: "Mathematics 7".to_string(),
            description: None,
            grade_level_id: Some(1),
        };
        assert!(req.validate().is_ok());

        req.subject_code = "X".repeat(21);
        assert!(req.validate().is_err());

        req.subject_code = "MATH7".to_string();
        req.grade_level_id = Some(0);
        assert!(req.validate().is_err());
    }
}
