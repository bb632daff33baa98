// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod activity_logger;
pub mod dashboard_service;
pub mod grade_level_service;
pub mod school_year_service;
pub mod semester_service;
pub mod subject_service;

pub use activity_logger::ActivityLogger;
pub use dashboard_service::*;
pub use grade_level_service::*;
pub use school_year_service::*;
pub use semester_service::*;
pub use subject_service::*;
