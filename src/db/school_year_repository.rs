// src/db/school_year_repository.rs
// DOCUMENTATION: School year database operations
// PURPOSE: CRUD and activation for the school_years table

use crate::db::row_id;
use crate::errors::SchoolError;
use crate::models::{SchoolYear, SchoolYearRequest};
use sqlx::{MySqlConnection, MySqlPool};

const LABEL: &str = "School year";

pub struct SchoolYearRepository;

impl SchoolYearRepository {
    /// List all school years, most recent first
    pub async fn list(pool: &MySqlPool) -> Result<Vec<SchoolYear>, SchoolError> {
        sqlx::query_as::<_, SchoolYear>(
            r#"
            SELECT id, year_label, start_date, end_date, is_active, created_at, updated_at
            FROM school_years
            ORDER BY start_date DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to fetch school years", LABEL, e))
    }

    pub async fn find_by_id(pool: &MySqlPool, id: i32) -> Result<Option<SchoolYear>, SchoolError> {
        sqlx::query_as::<_, SchoolYear>(
            r#"
            SELECT id, year_label, start_date, end_date, is_active, created_at, updated_at
            FROM school_years
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to fetch school year", LABEL, e))
    }

    /// Insert a school year and return the stored row
    /// DOCUMENTATION: An active year is inserted and every other year is
    /// deactivated in the same transaction
    pub async fn create(pool: &MySqlPool, req: &SchoolYearRequest) -> Result<SchoolYear, SchoolError> {
        let context = "Failed to create school year";
        let is_active = req.is_active == Some(true);

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO school_years (year_label, start_date, end_date, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&req.year_label)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(is_active)
        .execute(&mut *tx)
        .await
        .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        let id = row_id(result.last_insert_id(), context)?;
        if is_active {
            Self::deactivate_others(&mut *tx, id, context).await?;
        }

        tx.commit()
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        log::info!("Created school year with id: {}", id);

        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    /// Update label and dates; the active flag is only changed through `activate`
    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: &SchoolYearRequest,
    ) -> Result<u64, SchoolError> {
        let result = sqlx::query(
            r#"
            UPDATE school_years
            SET year_label = ?, start_date = ?, end_date = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&req.year_label)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| SchoolError::from_sqlx("Failed to update school year", LABEL, e))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &MySqlPool, id: i32) -> Result<u64, SchoolError> {
        let result = sqlx::query("DELETE FROM school_years WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| SchoolError::from_sqlx("Failed to delete school year", LABEL, e))?;

        Ok(result.rows_affected())
    }

    /// Mark one school year active and every other one inactive
    /// DOCUMENTATION: Both updates run in a single transaction
    pub async fn activate(pool: &MySqlPool, id: i32) -> Result<(), SchoolError> {
        let context = "Failed to activate school year";
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        Self::deactivate_others(&mut *tx, id, context).await?;

        sqlx::query("UPDATE school_years SET is_active = TRUE, updated_at = NOW() WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        tx.commit()
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        log::info!("Activated school year {}", id);
        Ok(())
    }

    async fn deactivate_others(
        conn: &mut MySqlConnection,
        id: i32,
        context: &str,
    ) -> Result<(), SchoolError> {
        sqlx::query("UPDATE school_years SET is_active = FALSE, updated_at = NOW() WHERE id <> ? AND is_active = TRUE")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| SchoolError::from_sqlx(context, LABEL, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Connects only when TEST_DATABASE_URL points at a migrated schema
    async fn test_pool() -> Option<MySqlPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        MySqlPool::connect(&url).await.ok()
    }

    fn active_request(label: String) -> SchoolYearRequest {
        SchoolYearRequest {
            year_label: label,
            start_date: NaiveDate::from_ymd_opt(2031, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2032, 3, 31).unwrap(),
            is_active: Some(true),
        }
    }

    #[tokio::test]
    async fn test_create_active_year_leaves_exactly_one_active() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let suffix = chrono::Utc::now().timestamp_micros();

        let first = SchoolYearRepository::create(&pool, &active_request(format!("A-{}", suffix)))
            .await
            .unwrap();
        let second = SchoolYearRepository::create(&pool, &active_request(format!("B-{}", suffix)))
            .await
            .unwrap();

        assert!(second.is_active);
        let first = SchoolYearRepository::find_by_id(&pool, first.id).await.unwrap().unwrap();
        assert!(!first.is_active);

        let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM school_years WHERE is_active = TRUE")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(active, 1);

        SchoolYearRepository::delete(&pool, first.id).await.unwrap();
        SchoolYearRepository::delete(&pool, second.id).await.unwrap();
    }
}
