// src/handlers/subjects.rs
// DOCUMENTATION: HTTP handlers for subjects

use crate::config::ConnectionPool;
use crate::errors::SchoolError;
use crate::models::SubjectRequest;
use crate::services::activity_logger::actor_from_request;
use crate::services::SubjectService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// GET /api/subjects
pub async fn list_subjects(pool: web::Data<ConnectionPool>) -> Result<impl Responder, SchoolError> {
    let subjects = SubjectService::list(pool.inner()).await?;
    Ok(HttpResponse::Ok().json(subjects))
}

/// POST /api/subjects
/// A duplicate subject_code answers 409
pub async fn create_subject(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    req: web::Json<SubjectRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let subject = SubjectService::create(pool.inner(), req.into_inner(), &actor).await?;
    Ok(HttpResponse::Created().json(subject))
}

/// PUT /api/subjects/{id}
pub async fn update_subject(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
    req: web::Json<SubjectRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let subject =
        SubjectService::update(pool.inner(), path.into_inner(), req.into_inner(), &actor)
            .await?;
    Ok(HttpResponse::Ok().json(subject))
}

/// DELETE /api/subjects/{id}
pub async fn delete_subject(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
) -> Result<impl Responder, SchoolError> {
    let actor = actor_from_request(&http);
    SubjectService::delete(pool.inner(), path.into_inner(), &actor).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/subjects")
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject))
            .route("/{id}", web::put().to(update_subject))
            .route("/{id}", web::delete().to(delete_subject)),
    );
}
