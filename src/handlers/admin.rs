// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for dashboard and activity log
// PURPOSE: Token-protected read endpoints for administrators

use crate::config::{Config, ConnectionPool};
use crate::errors::SchoolError;
use crate::models::ActivityLogQuery;
use crate::services::{ActivityLogger, DashboardService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// Upper bound for ?limit= on the activity log
const MAX_ACTIVITY_LIMIT: u32 = 500;

/// GET /api/admin/dashboard
/// Aggregate counts, active school year and latest activity
pub async fn dashboard(
    pool: web::Data<ConnectionPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, SchoolError> {
    verify_admin_token(&req, &config)?;

    let summary = DashboardService::summary(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/admin/activity-logs?limit=
/// Most recent audit entries first
pub async fn activity_logs(
    pool: web::Data<ConnectionPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    query: web::Query<ActivityLogQuery>,
) -> Result<impl Responder, SchoolError> {
    verify_admin_token(&req, &config)?;

    let limit = effective_limit(query.limit, config.activity_log_page_size)?;
    let entries = ActivityLogger::recent(pool.inner(), limit).await?;
    Ok(HttpResponse::Ok().json(entries))
}

fn effective_limit(requested: Option<u32>, default: u32) -> Result<u32, SchoolError> {
    match requested {
        None => Ok(default.min(MAX_ACTIVITY_LIMIT)),
        Some(0) => Err(SchoolError::InvalidInput("limit must be at least 1".to_string())),
        Some(limit) => Ok(limit.min(MAX_ACTIVITY_LIMIT)),
    }
}

/// Helper function to verify admin authentication
/// DOCUMENTATION: Checks X-Admin-Token header against configured admin token
fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), SchoolError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            SchoolError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(SchoolError::Forbidden);
    }

    Ok(())
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .route("/dashboard", web::get().to(dashboard))
            .route("/activity-logs", web::get().to(activity_logs)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn config() -> Config {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "info".to_string(),
            admin_token: "letmein".to_string(),
            activity_log_page_size: 50,
        }
    }

    #[actix_rt::test]
    async fn test_admin_token_checks() {
        let config = config();

        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            verify_admin_token(&req, &config),
            Err(SchoolError::Unauthorized)
        ));

        let req = TestRequest::default()
            .insert_header(("X-Admin-Token", "wrong"))
            .to_http_request();
        assert!(matches!(
            verify_admin_token(&req, &config),
            Err(SchoolError::Forbidden)
        ));

        let req = TestRequest::default()
            .insert_header(("X-Admin-Token", "letmein"))
            .to_http_request();
        assert!(verify_admin_token(&req, &config).is_ok());
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None, 50).unwrap(), 50);
        assert_eq!(effective_limit(Some(10), 50).unwrap(), 10);
        assert_eq!(effective_limit(Some(10_000), 50).unwrap(), MAX_ACTIVITY_LIMIT);
        assert!(effective_limit(Some(0), 50).is_err());
    }
}
