// src/models/school_year.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::check_date_range;

/// Academic year, e.g. "2024-2025"
/// Only one school year is active at a time
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolYear {
    pub id: i32,
    pub year_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of POST and PUT /api/school-years
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_school_year_dates"))]
pub struct SchoolYearRequest {
    #[validate(length(min = 1, max = 20))]
    pub year_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: Option<bool>,
}

fn validate_school_year_dates(req: &SchoolYearRequest) -> Result<(), validator::ValidationError> {
    check_date_range(req.start_date, req.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(label: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> SchoolYearRequest {
        SchoolYearRequest {
            year_label: label.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            is_active: None,
        }
    }

    #[test]
    fn test_valid_school_year() {
        let req = request("2024-2025", (2024, 6, 3), (2025, 3, 31));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let req = request("2024-2025", (2025, 6, 3), (2024, 3, 31));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let req = request("", (2024, 6, 3), (2025, 3, 31));
        assert!(req.validate().is_err());
    }
}
