// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod activity_log_repository;
pub mod grade_level_repository;
pub mod rows;
pub mod school_year_repository;
pub mod semester_repository;
pub mod subject_repository;

pub use activity_log_repository::*;
pub use grade_level_repository::*;
pub use school_year_repository::*;
pub use semester_repository::*;
pub use subject_repository::*;

use crate::errors::SchoolError;

/// Narrow an auto-increment id to the i32 key the tables use
pub(crate) fn row_id(raw: u64, context: &str) -> Result<i32, SchoolError> {
    i32::try_from(raw).map_err(|_| {
        log::error!("{}: generated id {} exceeds the INT key range", context, raw);
        SchoolError::DatabaseError(context.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_within_range() {
        assert_eq!(row_id(42, "Failed to create subject").unwrap(), 42);
        assert_eq!(row_id(i32::MAX as u64, "Failed to create subject").unwrap(), i32::MAX);
    }

    #[test]
    fn test_row_id_out_of_range_is_database_error() {
        let err = row_id(i32::MAX as u64 + 1, "Failed to create semester").unwrap_err();

        assert!(matches!(err, SchoolError::DatabaseError(_)));
        assert_eq!(err.to_string(), "Failed to create semester");
    }
}
