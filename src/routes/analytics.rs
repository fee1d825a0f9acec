use crate::analytics::AnalyticsStore;
use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::models::analytics::{AnalyticsSnapshot, PageViewRequest, ProjectViewRequest};
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/analytics",
    responses((status = 200, description = "Current counters", body = AnalyticsSnapshot)),
    tag = "Analytics"
)]
#[get("")]
pub async fn get_analytics(store: web::Data<AnalyticsStore>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": store.snapshot(),
    }))
}

/// Counts a page view. The body is optional; a `visitorId` feeds the
/// unique-visitor count.
#[utoipa::path(
    post,
    path = "/api/analytics/pageview",
    request_body = PageViewRequest,
    responses((status = 200, description = "Page view tracked")),
    tag = "Analytics"
)]
#[post("/pageview")]
pub async fn track_page_view(
    req: Option<web::Json<PageViewRequest>>,
    store: web::Data<AnalyticsStore>,
) -> impl Responder {
    let req = req.map(web::Json::into_inner).unwrap_or_default();
    let total = store.record_page_view(req.visitor_id.as_deref());

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Page view tracked",
        "totalViews": total,
    }))
}

#[utoipa::path(
    post,
    path = "/api/analytics/project-view",
    request_body = ProjectViewRequest,
    responses(
        (status = 200, description = "Project view tracked"),
        (status = 400, description = "Missing projectId")
    ),
    tag = "Analytics"
)]
#[post("/project-view")]
pub async fn track_project_view(
    req: web::Json<ProjectViewRequest>,
    store: web::Data<AnalyticsStore>,
) -> Result<HttpResponse, ApiError> {
    let project_id = req
        .project_key()
        .ok_or_else(|| ApiError::Validation("\"projectId\" is required".into()))?;
    let views = store.record_project_view(&project_id, req.project_title.as_deref());

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Project view tracked",
        "projectViews": views,
    })))
}

#[utoipa::path(
    post,
    path = "/api/analytics/contact-submission",
    responses((status = 200, description = "Contact submission tracked")),
    tag = "Analytics"
)]
#[post("/contact-submission")]
pub async fn track_contact_submission(store: web::Data<AnalyticsStore>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Contact submission tracked",
        "total": store.record_contact_submission(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/analytics/reset",
    responses(
        (status = 200, description = "Counters reset"),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Analytics"
)]
#[post("/reset")]
pub async fn reset_analytics(
    session: AdminSession,
    store: web::Data<AnalyticsStore>,
) -> impl Responder {
    store.reset();
    info!(admin = %session.0.sub, "analytics reset");

    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Analytics reset successfully",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .service(get_analytics)
            .service(track_page_view)
            .service(track_project_view)
            .service(track_contact_submission)
            .service(reset_analytics),
    );
}
