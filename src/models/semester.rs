// src/models/semester.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::check_date_range;

/// Term within a school year
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Semester {
    pub id: i32,
    pub school_year_id: i32,
    pub semester_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Label of the owning school year (joined)
    #[sqlx(default)]
    pub year_label: Option<String>,
}

/// Body of POST and PUT /api/semesters
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_semester_dates"))]
pub struct SemesterRequest {
    #[validate(range(min = 1))]
    pub school_year_id: i32,
    #[validate(length(min = 1, max = 50))]
    pub semester_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: Option<bool>,
}

fn validate_semester_dates(req: &SemesterRequest) -> Result<(), validator::ValidationError> {
    check_date_range(req.start_date, req.end_date)
}

/// Query parameters for GET /api/semesters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemesterQuery {
    pub school_year_id: Option<i32>,
}
