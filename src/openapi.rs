use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `#[utoipa::path]` annotations on the
/// route handlers and served by Swagger UI at `/swagger-ui/`.
///
/// Admin-only operations expect `Authorization: Bearer <token>` obtained
/// from `POST /api/auth/login`.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::contact::contact_status,
        crate::routes::contact::submit_contact,
        crate::routes::contact::check_email,
        crate::routes::contact::list_messages,
        crate::routes::contact::delete_message,
        crate::routes::contact::mark_message_read,
        crate::routes::auth::auth_status,
        crate::routes::auth::login,
        crate::routes::auth::verify,
        crate::routes::auth::logout,
        crate::routes::analytics::get_analytics,
        crate::routes::analytics::track_page_view,
        crate::routes::analytics::track_project_view,
        crate::routes::analytics::track_contact_submission,
        crate::routes::analytics::reset_analytics,
        crate::routes::admin::list_projects,
        crate::routes::admin::get_project,
        crate::routes::admin::create_project,
        crate::routes::admin::update_project,
        crate::routes::admin::delete_project,
        crate::routes::admin::list_skills,
        crate::routes::admin::create_skill,
        crate::routes::admin::update_skill,
        crate::routes::admin::delete_skill,
        crate::routes::admin::dashboard,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::contact::ContactRequest,
            crate::models::contact::ContactMessage,
            crate::models::contact::EmailCheckRequest,
            crate::models::auth::LoginRequest,
            crate::models::auth::LoginResponse,
            crate::models::auth::UserInfo,
            crate::models::analytics::PageViewRequest,
            crate::models::analytics::ProjectViewRequest,
            crate::models::analytics::ProjectViews,
            crate::models::analytics::AnalyticsSnapshot,
            crate::models::portfolio::ProjectRequest,
            crate::models::portfolio::Project,
            crate::models::portfolio::SkillRequest,
            crate::models::portfolio::Skill,
            crate::models::portfolio::DashboardStats,
            crate::handlers::validation::plausibility::Verdict,
            crate::handlers::validation::plausibility::Reason,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Contact", description = "Contact form and email plausibility checks"),
        (name = "Auth", description = "Admin login and token verification"),
        (name = "Analytics", description = "Page and project view counters"),
        (name = "Admin", description = "Project and skill editing for the portfolio owner")
    ),
    info(
        description = "Backend for the portfolio site: contact relay with email plausibility checks, admin login, project and skill editing, analytics counters",
        title = "Portfolio Backend API",
        version = "0.3.0",
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_contact_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/contact"));
        assert!(paths.contains_key("/api/contact/check-email"));
        assert!(paths.contains_key("/api/contact/messages/{id}"));
        assert!(paths.contains_key("/api/auth/login"));
        assert!(paths.contains_key("/api/health"));
        assert!(paths.contains_key("/api/admin/projects/{id}"));
        assert!(paths.contains_key("/api/admin/dashboard"));
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("Portfolio Backend API"));
        assert!(json.contains("no-mx-records"));
    }
}
