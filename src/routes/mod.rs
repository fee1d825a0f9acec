use crate::error::ApiError;
use actix_cors::Cors;
use actix_web::{HttpResponse, Responder, get, http::header, web};
use serde_json::json;

/// Project/skill editing and the dashboard summary, admin only.
pub mod admin;

/// Analytics counters: page views, project views, contact submissions.
pub mod analytics;

/// # Admin Authentication Endpoints
///
/// Login with the configured admin credentials, verify a bearer token,
/// logout.
pub mod auth;

/// # Contact Endpoints
///
/// Contact form submission (guarded by the email plausibility checker),
/// standalone email check and the admin inbox.
///
/// ## Example Request
/// ```json
/// { "name": "Ada", "email": "ada@example.com", "message": "Hello there!" }
/// ```
pub mod contact;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Example Response
///
/// ```json
/// {
///   "success": true,
///   "status": "UP",
///   "message": "OK",
///   "uptime_secs": 12,
///   "timestamp": "2023-10-05T12:34:56.789Z",
///   "environment": "development"
/// }
/// ```
pub mod health;

/// # Root Endpoint
///
/// Service name, version and the map of mounted endpoints.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Portfolio Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "contact": "/api/contact",
            "auth": "/api/auth",
            "analytics": "/api/analytics",
            "admin": "/api/admin",
            "docs": "/swagger-ui/",
        }
    }))
}

/// Browser cross-origin policy for the portfolio frontend.
///
/// Only the listed origins may call the API; credentials and the
/// `Authorization` header are allowed so the admin dashboard can send its
/// bearer token.
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

/// Fallback for unknown paths.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Not Found",
        "message": "The requested endpoint does not exist",
    }))
}

/// # API Route Configuration
///
/// Mounts every endpoint under the `/api` base path, plus the root info
/// endpoint. Malformed JSON bodies are answered with the same error body as
/// other validation failures.
///
/// ## Example Endpoints
///
/// ```text
/// GET    /api/health
/// POST   /api/contact
/// POST   /api/contact/check-email
/// GET    /api/contact/messages          (admin)
/// POST   /api/auth/login
/// GET    /api/analytics
/// GET    /api/admin/projects            (admin)
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .service(index)
    .service(
        web::scope("/api")
            .configure(health::configure_routes)
            .configure(contact::configure_routes)
            .configure(auth::configure_routes)
            .configure(analytics::configure_routes)
            .configure(admin::configure_routes),
    );
}
