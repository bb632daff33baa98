// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod admin;
pub mod grade_levels;
pub mod health;
pub mod school_years;
pub mod semesters;
pub mod subjects;

pub use admin::config as admin_config;
pub use grade_levels::config as grade_levels_config;
pub use health::config as health_config;
pub use school_years::config as school_years_config;
pub use semesters::config as semesters_config;
pub use subjects::config as subjects_config;
