// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod activity_log;
pub mod dashboard;
pub mod grade_level;
pub mod school_year;
pub mod semester;
pub mod subject;

pub use activity_log::*;
pub use dashboard::*;
pub use grade_level::*;
pub use school_year::*;
pub use semester::*;
pub use subject::*;

use chrono::NaiveDate;
use validator::ValidationError;

/// Shared check for dated records: the range must not end before it starts
pub(crate) fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end <= start {
        let mut err = ValidationError::new("date_range");
        err.message = Some("end_date must be after start_date".into());
        return Err(err);
    }
    Ok(())
}
