// src/handlers/grade_levels.rs
// DOCUMENTATION: HTTP handlers for grade levels

use crate::config::ConnectionPool;
use crate::errors::SchoolError;
use crate::models::GradeLevelRequest;
use crate::services::activity_logger::actor_from_request;
use crate::services::GradeLevelService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// GET /api/grade-levels
pub async fn list_grade_levels(pool: web::Data<ConnectionPool>) -> Result<impl Responder, SchoolError> {
    let levels = GradeLevelService::list(pool.inner()).await?;
    Ok(HttpResponse::Ok().json(levels))
}

/// POST /api/grade-levels
pub async fn create_grade_level(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    req: web::Json<GradeLevelRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let level = GradeLevelService::create(pool.inner(), req.into_inner(), &actor).await?;
    Ok(HttpResponse::Created().json(level))
}

/// PUT /api/grade-levels/{id}
pub async fn update_grade_level(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
    req: web::Json<GradeLevelRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let level =
        GradeLevelService::update(pool.inner(), path.into_inner(), req.into_inner(), &actor)
            .await?;
    Ok(HttpResponse::Ok().json(level))
}

/// DELETE /api/grade-levels/{id}
pub async fn delete_grade_level(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
) -> Result<impl Responder, SchoolError> {
    let actor = actor_from_request(&http);
    GradeLevelService::delete(pool.inner(), path.into_inner(), &actor).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/grade-levels")
            .route("", web::get().to(list_grade_levels))
            .route("", web::post().to(create_grade_level))
            .route("/{id}", web::put().to(update_grade_level))
            .route("/{id}", web::delete().to(delete_grade_level)),
    );
}
