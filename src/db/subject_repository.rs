// src/db/subject_repository.rs
// DOCUMENTATION: Subject database operations
// PURPOSE: CRUD for the subjects table

use crate::db::row_id;
use crate::errors::SchoolError;
use crate::models::{Subject, SubjectRequest};
use sqlx::MySqlPool;

const LABEL: &str = "Subject";

const SELECT_SUBJECT: &str = r#"
    SELECT sub.id, sub.subject_code, sub.subject_name, sub.description, sub.grade_level_id,
           sub.created_at, sub.updated_at, gl.level_name
    FROM subjects sub
    LEFT JOIN grade_levels gl ON gl.id = sub.grade_level_id
"#;

pub struct SubjectRepository;

impl SubjectRepository {
    pub async fn list(pool: &MySqlPool) -> Result<Vec<Subject>, SchoolError> {
        sqlx::query_as::<_, Subject>(&format!("{} ORDER BY sub.subject_code", SELECT_SUBJECT))
            .fetch_all(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to fetch subjects", LABEL, e))
    }

    pub async fn find_by_id(pool: &MySqlPool, id: i32) -> Result<Option<Subject>, SchoolError> {
        sqlx::query_as::<_, Subject>(&format!("{} WHERE sub.id = ?", SELECT_SUBJECT))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to fetch subject", LABEL, e))
    }

    /// Insert a subject; a duplicate subject_code yields AlreadyExists
    pub async fn create(pool: &MySqlPool, req: &SubjectRequest) -> Result<Subject, SchoolError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subjects (subject_code, subject_name, description, grade_level_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&req.subject_code)
        .bind(&req.subject_name)
        .bind(&req.description)
        .bind(req.grade_level_id)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to create subject", LABEL, e))?;

        let id = row_id(result.last_insert_id(), "Failed to create subject")?;
        log::info!("Created subject with id: {}", id);

        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    pub async fn update(pool: &MySqlPool, id: i32, req: &SubjectRequest) -> Result<u64, SchoolError> {
        let result = sqlx::query(
            r#"
            UPDATE subjects
            SET subject_code = ?, subject_name = ?, description = ?, grade_level_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&req.subject_code)
        .bind(&req.subject_name)
        .bind(&req.description)
        .bind(req.grade_level_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to update subject", LABEL, e))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &MySqlPool, id: i32) -> Result<u64, SchoolError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to delete subject", LABEL, e))?;

        Ok(result.rows_affected())
    }
}
