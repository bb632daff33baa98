// src/handlers/semesters.rs
// DOCUMENTATION: HTTP handlers for semesters

use crate::config::ConnectionPool;
use crate::errors::SchoolError;
use crate::models::{SemesterQuery, SemesterRequest};
use crate::services::activity_logger::actor_from_request;
use crate::services::SemesterService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// GET /api/semesters?school_year_id=
pub async fn list_semesters(
    pool: web::Data<ConnectionPool>,
    query: web::Query<SemesterQuery>,
) -> Result<impl Responder, SchoolError> {
    let semesters = SemesterService::list(pool.inner(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(semesters))
}

/// POST /api/semesters
pub async fn create_semester(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    req: web::Json<SemesterRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let semester = SemesterService::create(pool.inner(), req.into_inner(), &actor).await?;
    Ok(HttpResponse::Created().json(semester))
}

/// PUT /api/semesters/{id}
pub async fn update_semester(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
    req: web::Json<SemesterRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let semester =
        SemesterService::update(pool.inner(), path.into_inner(), req.into_inner(), &actor)
            .await?;
    Ok(HttpResponse::Ok().json(semester))
}

/// DELETE /api/semesters/{id}
pub async fn delete_semester(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
) -> Result<impl Responder, SchoolError> {
    let actor = actor_from_request(&http);
    SemesterService::delete(pool.inner(), path.into_inner(), &actor).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/semesters")
            .route("", web::get().to(list_semesters))
            .route("", web::post().to(create_semester))
            .route("/{id}", web::put().to(update_semester))
            .route("/{id}", web::delete().to(delete_semester)),
    );
}
