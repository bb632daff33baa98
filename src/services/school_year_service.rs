// src/services/school_year_service.rs
// DOCUMENTATION: Business logic for school years
// PURPOSE: Lookup-before-mutate, single active year, activity logging

use crate::db::SchoolYearRepository;
use crate::errors::SchoolError;
use crate::models::{SchoolYear, SchoolYearRequest};
use crate::services::activity_logger::{describe, describe_update, Action, ActivityLogger};
use sqlx::MySqlPool;

const LABEL: &str = "School year";

pub struct SchoolYearService;

impl SchoolYearService {
    pub async fn list(pool: &MySqlPool) -> Result<Vec<SchoolYear>, SchoolError> {
        SchoolYearRepository::list(pool).await
    }

    /// Fetch a school year or fail with NotFound
    pub async fn get(pool: &MySqlPool, id: i32) -> Result<SchoolYear, SchoolError> {
        SchoolYearRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    /// Create a school year; `is_active: true` also deactivates every other year
    pub async fn create(
        pool: &MySqlPool,
        req: SchoolYearRequest,
        actor: &str,
    ) -> Result<SchoolYear, SchoolError> {
        let year = SchoolYearRepository::create(pool, &req).await?;
        ActivityLogger::record(pool, describe(Action::Create, &year, actor)).await;
        Ok(year)
    }

    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: SchoolYearRequest,
        actor: &str,
    ) -> Result<SchoolYear, SchoolError> {
        let before = Self::get(pool, id).await?;

        SchoolYearRepository::update(pool, id, &req).await?;
        if req.is_active == Some(true) && !before.is_active {
            SchoolYearRepository::activate(pool, id).await?;
        }

        let after = Self::get(pool, id).await?;
        ActivityLogger::record(pool, describe_update(&before, &after, actor)).await;
        Ok(after)
    }

    pub async fn delete(pool: &MySqlPool, id: i32, actor: &str) -> Result<(), SchoolError> {
        let existing = Self::get(pool, id).await?;

        if SchoolYearRepository::delete(pool, id).await? == 0 {
            return Err(SchoolError::NotFound(LABEL.to_string()));
        }

        ActivityLogger::record(pool, describe(Action::Delete, &existing, actor)).await;
        Ok(())
    }

    /// Make this the only active school year
    pub async fn activate(pool: &MySqlPool, id: i32, actor: &str) -> Result<SchoolYear, SchoolError> {
        let existing = Self::get(pool, id).await?;

        SchoolYearRepository::activate(pool, id).await?;
        ActivityLogger::record(pool, describe(Action::Activate, &existing, actor)).await;

        Ok(SchoolYear {
            is_active: true,
            ..existing
        })
    }
}
