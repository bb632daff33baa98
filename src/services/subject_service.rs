// src/services/subject_service.rs
// DOCUMENTATION: Business logic for subjects

use crate::db::{GradeLevelRepository, SubjectRepository};
use crate::errors::SchoolError;
use crate::models::{Subject, SubjectRequest};
use crate::services::activity_logger::{describe, describe_update, Action, ActivityLogger};
use sqlx::MySqlPool;

const LABEL: &str = "Subject";

pub struct SubjectService;

impl SubjectService {
    pub async fn list(pool: &MySqlPool) -> Result<Vec<Subject>, SchoolError> {
        SubjectRepository::list(pool).await
    }

    pub async fn get(pool: &MySqlPool, id: i32) -> Result<Subject, SchoolError> {
        SubjectRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| SchoolError::NotFound(LABEL.to_string()))
    }

    async fn ensure_grade_level(pool: &MySqlPool, grade_level_id: Option<i32>) -> Result<(), SchoolError> {
        let Some(id) = grade_level_id else {
            return Ok(());
        };

        match GradeLevelRepository::find_by_id(pool, id).await? {
            Some(_) => Ok(()),
            None => Err(SchoolError::InvalidInput(format!(
                "grade level {} does not exist",
                id
            ))),
        }
    }

    pub async fn create(
        pool: &MySqlPool,
        req: SubjectRequest,
        actor: &str,
    ) -> Result<Subject, SchoolError> {
        Self::ensure_grade_level(pool, req.grade_level_id).await?;

        let subject = SubjectRepository::create(pool, &req).await?;
        ActivityLogger::record(pool, describe(Action::Create, &subject, actor)).await;
        Ok(subject)
    }

    pub async fn update(
        pool: &MySqlPool,
        id: i32,
        req: SubjectRequest,
        actor: &str,
    ) -> Result<Subject, SchoolError> {
        let before = Self::get(pool, id).await?;
        Self::ensure_grade_level(pool, req.grade_level_id).await?;

        SubjectRepository::update(pool, id, &req).await?;

        let after = Self::get(pool, id).await?;
        ActivityLogger::record(pool, describe_update(&before, &after, actor)).await;
        Ok(after)
    }

    pub async fn delete(pool: &MySqlPool, id: i32, actor: &str) -> Result<(), SchoolError> {
        let existing = Self::get(pool, id).await?;

        if SubjectRepository::delete(pool, id).await? == 0 {
            return Err(SchoolError::NotFound(LABEL.to_string()));
        }

        ActivityLogger::record(pool, describe(Action::Delete, &existing, actor)).await;
        Ok(())
    }
}
