// src/services/grade_level_service.rs
// DOCUMENTATION: Business logic for grade levels

use crate::db::GradeLevelRepository;
use crate::errors::SchoolError;
use crate::models::{GradeLevel, GradeLevelRequest};
use crate::services::activity_logger::{describe, describe_update, Action, ActivityLogger};
use sqlx::MySqlPool;

const LABEL: &str = "Grade level";

pub struct GradeLevelService;

impl GradeLevelService {
    pub async fn list(pool: &MySqlPool) -> Result<Vec<GradeLevel>, SchoolError> {
        GradeLevelRepository::list(pool).await
    }

    pub async fn get(pool: &MySqlPool, id: i32) -> Result<GradeLevel, SchoolError> {
        GradeLevelRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    pub async fn create(
        pool: &MySqlPool,
        req: GradeLevelRequest,
        actor: &str,
    ) -> Result<GradeLevel, SchoolError> {
        let level = GradeLevelRepository::create(pool, &req).await?;
        ActivityLogger::record(pool, describe(Action::Create, &level, actor)).await;
        Ok(level)
    }

    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: GradeLevelRequest,
        actor: &str,
    ) -> Result<GradeLevel, SchoolError> {
        let before = Self::get(pool, id).await?;

        GradeLevelRepository::update(pool, id, &req).await?;

        let after = Self::get(pool, id).await?;
        ActivityLogger::record(pool, describe_update(&before, &after, actor)).await;
        Ok(after)
    }

    /// Delete a grade level; subjects still pointing at it block the delete
    pub async fn delete(pool: &MySqlPool, id: i32, actor: &str) -> Result<(), SchoolError> {
        let existing = Self::get(pool, id).await?;

        if GradeLevelRepository::delete(pool, id).await? == 0 {
            return Err(SchoolError::NotFound(LABEL.to_string()));
        }

        ActivityLogger::record(pool, describe(Action::Delete, &existing, actor)).await;
        Ok(())
    }
}
