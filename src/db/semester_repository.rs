// src/db/semester_repository.rs
// DOCUMENTATION: Semester database operations
// PURPOSE: CRUD for the semesters table, joined with the owning school year

use crate::db::row_id;
use crate::errors::SchoolError;
use crate::models::{Semester, SemesterRequest};
use sqlx::MySqlPool;

const LABEL: &str = "Semester";

const SELECT_SEMESTER: &str = r#"
    SELECT s.id, s.school_year_id, s.semester_name, s.start_date, s.end_date,
           s.is_active, s.created_at, s.updated_at, sy.year_label
    FROM semesters s
    LEFT JOIN school_years sy ON sy.id = s.school_year_id
"#;

pub struct SemesterRepository;

impl SemesterRepository {
    /// List semesters, optionally restricted to one school year
    pub async fn list(
        pool: &MySqlPool,
        school_year_id: Option<i32>,
    ) -> Result<Vec<Semester>, SchoolError> {
        let sql = match school_year_id {
            Some(_) => format!(
                "{} WHERE s.school_year_id = ? ORDER BY s.start_date",
                SELECT_SEMESTER
            ),
            None => format!(
                "{} ORDER BY sy.start_date DESC, s.start_date",
                SELECT_SEMESTER
            ),
        };

        let mut query = sqlx::query_as::<_, Semester>(&sql);
        if let Some(year_id) = school_year_id {
            query = query.bind(year_id);
        }

        query
            .fetch_all(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to fetch semesters", LABEL, e))
    }

    pub async fn find_by_id(pool: &MySqlPool, id: i32) -> Result<Option<Semester>, SchoolError> {
        sqlx::query_as::<_, Semester>(&format!("{} WHERE s.id = ?", SELECT_SEMESTER))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to fetch semester", LABEL, e))
    }

    pub async fn create(pool: &MySqlPool, req: &SemesterRequest) -> Result<Semester, SchoolError> {
        let result = sqlx::query(
            r#"
            INSERT INTO semesters (school_year_id, semester_name, start_date, end_date, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(req.school_year_id)
        .bind(&req.semester_name)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.is_active.unwrap_or(false))
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to create semester", LABEL, e))?;

        let id = row_id(result.last_insert_id(), "Failed to create semester")?;
        log::info!("Created semester with id: {}", id);

        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    pub async fn update(pool: &MySqlPool, id: i32, req: &SemesterRequest) -> Result<u64, SchoolError> {
        let result = sqlx::query(
            r#"
            UPDATE semesters
            SET school_year_id = ?, semester_name = ?, start_date = ?, end_date = ?,
                is_active = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(req.school_year_id)
        .bind(&req.semester_name)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.is_active.unwrap_or(false))
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to update semester", LABEL, e))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &MySqlPool, id: i32) -> Result<u64, SchoolError> {
        let result = sqlx::query("DELETE FROM semesters WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to delete semester", LABEL, e))?;

        Ok(result.rows_affected())
    }
}
