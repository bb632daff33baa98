// src/db/grade_level_repository.rs
// DOCUMENTATION: Grade level database operations
// PURPOSE: CRUD for the grade_levels table

use crate::db::row_id;
use crate::errors::SchoolError;
use crate::models::{GradeLevel, GradeLevelRequest};
use sqlx::MySqlPool;

const LABEL: &str = "Grade level";

pub struct GradeLevelRepository;

impl GradeLevelRepository {
    pub async fn list(pool: &MySqlPool) -> Result<Vec<GradeLevel>, SchoolError> {
        sqlx::query_as::<_, GradeLevel>(
            r#"
            SELECT id, level_name, description, sort_order, created_at, updated_at
            FROM grade_levels
            ORDER BY sort_order, level_name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to fetch grade levels", LABEL, e))
    }

    pub async fn find_by_id(pool: &MySqlPool, id: i32) -> Result<Option<GradeLevel>, SchoolError> {
        sqlx::query_as::<_, GradeLevel>(
            r#"
            SELECT id, level_name, description, sort_order, created_at, updated_at
            FROM grade_levels
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to fetch grade level", LABEL, e))
    }

    /// Insert a grade level; without an explicit sort_order it goes last
    pub async fn create(pool: &MySqlPool, req: &GradeLevelRequest) -> Result<GradeLevel, SchoolError> {
        let result = sqlx::query(
            r#"
            INSERT INTO grade_levels (level_name, description, sort_order, created_at, updated_at)
            SELECT ?, ?, COALESCE(?, COALESCE(MAX(sort_order), 0) + 1), NOW(), NOW()
            FROM grade_levels
            "#,
        )
        .bind(&req.level_name)
        .bind(&req.description)
        .bind(req.sort_order)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to create grade level", LABEL, e))?;

        let id = row_id(result.last_insert_id(), "Failed to create grade level")?;
        log::info!("Created grade level with id: {}", id);

        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: &GradeLevelRequest,
    ) -> Result<u64, SchoolError> {
        let result = sqlx::query(
            r#"
            UPDATE grade_levels
            SET level_name = ?, description = ?, sort_order = COALESCE(?, sort_order), updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&req.level_name)
        .bind(&req.description)
        .bind(req.sort_order)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to update grade level", LABEL, e))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &MySqlPool, id: i32) -> Result<u64, SchoolError> {
        let result = sqlx::query("DELETE FROM grade_levels WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to delete grade level", LABEL, e))?;

        Ok(result.rows_affected())
    }
}
