// src/handlers/school_years.rs
// DOCUMENTATION: HTTP handlers for school years
// PURPOSE: Parse requests, call services, return responses

use crate::config::ConnectionPool;
use crate::errors::SchoolError;
use crate::models::SchoolYearRequest;
use crate::services::activity_logger::actor_from_request;
use crate::services::SchoolYearService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// GET /api/school-years
pub async fn list_school_years(pool: web::Data<ConnectionPool>) -> Result<impl Responder, SchoolError> {
    let years = SchoolYearService::list(pool.inner()).await?;
    Ok(HttpResponse::Ok().json(years))
}

/// POST /api/school-years
pub async fn create_school_year(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    req: web::Json<SchoolYearRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let year = SchoolYearService::create(pool.inner(), req.into_inner(), &actor).await?;
    Ok(HttpResponse::Created().json(year))
}

/// PUT /api/school-years/{id}
pub async fn update_school_year(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
    req: web::Json<SchoolYearRequest>,
) -> Result<impl Responder, SchoolError> {
    if let Err(e) = req.validate() {
        return Err(SchoolError::ValidationError(e.to_string()));
    }

    let actor = actor_from_request(&http);
    let year =
        SchoolYearService::update(pool.inner(), path.into_inner(), req.into_inner(), &actor)
            .await?;
    Ok(HttpResponse::Ok().json(year))
}

/// DELETE /api/school-years/{id}
pub async fn delete_school_year(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
) -> Result<impl Responder, SchoolError> {
    let actor = actor_from_request(&http);
    SchoolYearService::delete(pool.inner(), path.into_inner(), &actor).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/school-years/{id}/activate
/// Make the school year the only active one
pub async fn activate_school_year(
    pool: web::Data<ConnectionPool>,
    http: HttpRequest,
    path: web::Path<i32>,
) -> Result<impl Responder, SchoolError> {
    let actor = actor_from_request(&http);
    let year = SchoolYearService::activate(pool.inner(), path.into_inner(), &actor).await?;
    Ok(HttpResponse::Ok().json(year))
}

/// Configuration for school year routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/school-years")
            .route("", web::get().to(list_school_years))
            .route("", web::post().to(create_school_year))
            .route("/{id}", web::put().to(update_school_year))
            .route("/{id}", web::delete().to(delete_school_year))
            .route("/{id}/activate", web::post().to(activate_school_year)),
    );
}
