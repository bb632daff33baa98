// src/services/semester_service.rs
// DOCUMENTATION: Business logic for semesters
// PURPOSE: Check the owning school year, then mutate and log

use crate::db::{SchoolYearRepository, SemesterRepository};
use crate::errors::SchoolError;
use crate::models::{Semester, SemesterQuery, SemesterRequest};
use crate::services::activity_logger::{describe, describe_update, Action, ActivityLogger};
use sqlx::MySqlPool;

const LABEL: &str = "Semester";

pub struct SemesterService;

impl SemesterService {
    pub async fn list(pool: &MySqlPool, query: SemesterQuery) -> Result<Vec<Semester>, SchoolError> {
        SemesterRepository::list(pool, query.school_year_id).await
    }

    pub async fn get(pool: &MySqlPool, id: i32) -> Result<Semester, SchoolError> {
        SemesterRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    async fn ensure_school_year(pool: &MySqlPool, school_year_id: i32) -> Result<(), SchoolError> {
        match SchoolYearRepository::find_by_id(pool, school_year_id).await? {
            Some(_) => Ok(()),
            None => Err(SchoolError::InvalidInput(format!(
                "school year {} does not exist",
                school_year_id
            ))),
        }
    }

    pub async fn create(
        pool: &MySqlPool,
        req: SemesterRequest,
        actor: &str,
    ) -> Result<Semester, SchoolError> {
        Self::ensure_school_year(pool, req.school_year_id).await?;

        let semester = SemesterRepository::create(pool, &req).await?;
        ActivityLogger::record(pool, describe(Action::Create, &semester, actor)).await;
        Ok(semester)
    }

    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: SemesterRequest,
        actor: &str,
    ) -> Result<Semester, SchoolError> {
        let before = Self::get(pool, id).await?;
        if req.school_year_id != before.school_year_id {
            Self::ensure_school_year(pool, req.school_year_id).await?;
        }

        SemesterRepository::update(pool, id, &req).await?;

        let after = Self::get(pool, id).await?;
        ActivityLogger::record(pool, describe_update(&before, &after, actor)).await;
        Ok(after)
    }

    pub async fn delete(pool: &MySqlPool, id: i32, actor: &str) -> Result<(), SchoolError> {
        let existing = Self::get(pool, id).await?;

        if SemesterRepository::delete(pool, id).await? == 0 {
            return Err(SchoolError::NotFound(LABEL.to_string()));
        }

        ActivityLogger::record(pool, describe(Action::Delete, &existing, actor)).await;
        Ok(())
    }
}
