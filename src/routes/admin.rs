use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::models::portfolio::{
    DashboardStats, Project, ProjectRequest, Skill, SkillRequest,
};
use crate::portfolio::PortfolioStore;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;
use tracing::info;

fn project_not_found() -> ApiError {
    ApiError::NotFound("Project not found".into())
}

fn skill_not_found() -> ApiError {
    ApiError::NotFound("Skill not found".into())
}

// Non-numeric ids cannot match anything, so they are reported as unknown.
fn parse_id(raw: &str, not_found: fn() -> ApiError) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| not_found())
}

#[utoipa::path(
    get,
    path = "/api/admin/projects",
    responses(
        (status = 200, description = "All projects", body = [Project]),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Admin"
)]
#[get("/projects")]
pub async fn list_projects(
    _session: AdminSession,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let projects = store.projects();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": projects.len(),
        "projects": projects,
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/projects/{id}",
    params(("id" = u64, Path, description = "Project id")),
    responses(
        (status = 200, description = "The project", body = Project),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Project not found")
    ),
    tag = "Admin"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    _session: AdminSession,
    path: web::Path<String>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, project_not_found)?;
    let project = store.project(id).ok_or_else(project_not_found)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": project })))
}

/// # Create Project
///
/// `title` (3-200 chars), `description` (10-2000 chars) and `category` are
/// required. `image`, `liveUrl` and `githubUrl` must be absolute URIs when
/// present and non-empty.
#[utoipa::path(
    post,
    path = "/api/admin/projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid project"),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Admin"
)]
#[post("/projects")]
pub async fn create_project(
    session: AdminSession,
    req: web::Json<ProjectRequest>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let draft = req.into_inner().validate().map_err(ApiError::Validation)?;
    let project = store.add_project(draft);
    info!(id = project.id, title = %project.title, admin = %session.0.sub, "project created");

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Project created successfully",
        "project": project,
    })))
}

/// Replaces a project's required fields; optional fields missing from the
/// body keep their stored values.
#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}",
    params(("id" = u64, Path, description = "Project id")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Invalid project"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Project not found")
    ),
    tag = "Admin"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    session: AdminSession,
    path: web::Path<String>,
    req: web::Json<ProjectRequest>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let draft = req.into_inner().validate().map_err(ApiError::Validation)?;
    let id = parse_id(&path, project_not_found)?;
    let project = store
        .update_project(id, draft)
        .ok_or_else(project_not_found)?;
    info!(id, admin = %session.0.sub, "project updated");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Project updated successfully",
        "project": project,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}",
    params(("id" = u64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = Project),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Project not found")
    ),
    tag = "Admin"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    session: AdminSession,
    path: web::Path<String>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, project_not_found)?;
    let project = store.remove_project(id).ok_or_else(project_not_found)?;
    info!(id, admin = %session.0.sub, "project deleted");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Project deleted successfully",
        "project": project,
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/skills",
    responses(
        (status = 200, description = "All skills", body = [Skill]),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Admin"
)]
#[get("/skills")]
pub async fn list_skills(
    _session: AdminSession,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let skills = store.skills();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": skills.len(),
        "skills": skills,
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/skills",
    request_body = SkillRequest,
    responses(
        (status = 201, description = "Skill created", body = Skill),
        (status = 400, description = "Invalid skill"),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Admin"
)]
#[post("/skills")]
pub async fn create_skill(
    session: AdminSession,
    req: web::Json<SkillRequest>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let draft = req.into_inner().validate().map_err(ApiError::Validation)?;
    let skill = store.add_skill(draft);
    info!(id = skill.id, name = %skill.name, admin = %session.0.sub, "skill created");

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Skill created successfully",
        "skill": skill,
    })))
}

#[utoipa::path(
    put,
    path = "/api/admin/skills/{id}",
    params(("id" = u64, Path, description = "Skill id")),
    request_body = SkillRequest,
    responses(
        (status = 200, description = "Skill updated", body = Skill),
        (status = 400, description = "Invalid skill"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Skill not found")
    ),
    tag = "Admin"
)]
#[put("/skills/{id}")]
pub async fn update_skill(
    session: AdminSession,
    path: web::Path<String>,
    req: web::Json<SkillRequest>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let draft = req.into_inner().validate().map_err(ApiError::Validation)?;
    let id = parse_id(&path, skill_not_found)?;
    let skill = store.update_skill(id, draft).ok_or_else(skill_not_found)?;
    info!(id, admin = %session.0.sub, "skill updated");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Skill updated successfully",
        "skill": skill,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/skills/{id}",
    params(("id" = u64, Path, description = "Skill id")),
    responses(
        (status = 200, description = "Skill deleted", body = Skill),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Skill not found")
    ),
    tag = "Admin"
)]
#[delete("/skills/{id}")]
pub async fn delete_skill(
    session: AdminSession,
    path: web::Path<String>,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, skill_not_found)?;
    let skill = store.remove_skill(id).ok_or_else(skill_not_found)?;
    info!(id, admin = %session.0.sub, "skill deleted");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Skill deleted successfully",
        "skill": skill,
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Portfolio totals and recent projects", body = DashboardStats),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Admin"
)]
#[get("/dashboard")]
pub async fn dashboard(
    _session: AdminSession,
    store: web::Data<PortfolioStore>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": store.dashboard(),
    })))
}

/// Registers the admin routes under `/admin`. Every handler requires an
/// admin bearer token.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(list_projects)
            .service(get_project)
            .service(create_project)
            .service(update_project)
            .service(delete_project)
            .service(list_skills)
            .service(create_skill)
            .service(update_skill)
            .service(delete_skill)
            .service(dashboard),
    );
}
