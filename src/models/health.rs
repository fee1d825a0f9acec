use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Health Status Response
///
/// Liveness payload returned by `GET /api/health`.
///
/// ## Example JSON
/// ```json
/// {
///   "success": true,
///   "status": "UP",
///   "message": "OK",
///   "uptime_secs": 5321,
///   "timestamp": "2024-03-10T15:30:45.123456789+00:00",
///   "environment": "production"
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub message: String,
    pub uptime_secs: u64,
    pub timestamp: String,
    pub environment: String,
}

impl HealthResponse {
    pub fn up(uptime_secs: u64, environment: &str) -> Self {
        Self {
            success: true,
            status: "UP".to_string(),
            message: "OK".to_string(),
            uptime_secs,
            timestamp: Utc::now().to_rfc3339(),
            environment: environment.to_string(),
        }
    }
}
