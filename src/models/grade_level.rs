// src/models/grade_level.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GradeLevel {
    pub id: i32,
    pub level_name: String,
    pub description: Option<String>,
    /// Display order, lowest first
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of POST and PUT /api/grade-levels
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GradeLevelRequest {
    #[validate(length(min = 1, max = 50))]
    pub level_name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub sort_order: Option<i32>,
}
