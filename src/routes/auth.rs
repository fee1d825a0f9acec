use crate::auth::{ADMIN_ROLE, AdminAuth, AdminSession, AuthError};
use crate::error::ApiError;
use crate::models::auth::{LoginRequest, LoginResponse, UserInfo};
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;
use tracing::{info, warn};

#[utoipa::path(
    get,
    path = "/api/auth",
    responses((status = 200, description = "Auth API is up")),
    tag = "Auth"
)]
#[get("")]
pub async fn auth_status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Auth API is running" }))
}

/// # Admin Login
///
/// Checks the posted credentials against the single configured admin
/// account and returns a signed session token.
///
/// ## Responses
/// - **200 OK**: [`LoginResponse`] with the bearer token
/// - **400 Bad Request**: username or password missing
/// - **401 Unauthorized**: credentials do not match
/// - **503 Service Unavailable**: no admin account configured
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Admin login not configured")
    ),
    tag = "Auth"
)]
#[post("/login")]
pub async fn login(
    req: web::Json<LoginRequest>,
    auth: web::Data<AdminAuth>,
) -> Result<HttpResponse, ApiError> {
    let LoginRequest { username, password } = req.into_inner();
    let (Some(username), Some(password)) = (
        username.filter(|u| !u.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::Validation(
            "Please provide username and password".into(),
        ));
    };

    let token = auth.login(&username, &password).map_err(|err| {
        if matches!(err, AuthError::InvalidCredentials) {
            warn!(%username, "admin login rejected");
        }
        ApiError::from(err)
    })?;

    info!(%username, "admin logged in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        token,
        user: UserInfo {
            username,
            role: ADMIN_ROLE.into(),
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Auth"
)]
#[get("/verify")]
pub async fn verify(session: AdminSession) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "user": session.0,
    }))
}

/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logged out")),
    tag = "Auth"
)]
#[post("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged out successfully",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth_status)
            .service(login)
            .service(verify)
            .service(logout),
    );
}
