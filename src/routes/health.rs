use crate::models::health::HealthResponse;
use actix_web::{HttpResponse, Responder, get, web};
use std::time::Instant;

/// Process start time and environment name reported by the health check.
pub struct ServiceInfo {
    started: Instant,
    environment: String,
}

impl ServiceInfo {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            started: Instant::now(),
            environment: environment.into(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: [`HealthResponse`] with `status` ("UP"), uptime, environment and
///     an ISO 8601 `timestamp`
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health(info: web::Data<ServiceInfo>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up(info.uptime_secs(), &info.environment))
}

/// # Route Configuration
///
/// - `GET /health`: Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
