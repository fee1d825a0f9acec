use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::handlers::validation::plausibility::{EmailChecker, Reason, Verdict};
use crate::inbox::ContactInbox;
use crate::models::contact::{ContactRequest, EmailCheckRequest, is_email_shaped};
use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde_json::json;
use tracing::{info, warn};

fn rejection_message(verdict: &Verdict) -> String {
    match (verdict.reason(), verdict.suggestion()) {
        (Reason::Typo, Some(suggestion)) => format!("Did you mean {suggestion}?"),
        (Reason::Typo, None) => "The email domain looks misspelled".to_string(),
        (Reason::Disposable, _) => "Disposable email addresses are not accepted".to_string(),
        (Reason::NoMxRecords, _) => "The email domain does not accept mail".to_string(),
        (Reason::InvalidDomain, _) => "The email domain could not be resolved".to_string(),
        (Reason::InvalidSyntax, _) => "Email address has invalid syntax".to_string(),
        (Reason::None, _) => "Email address is valid".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/contact",
    responses((status = 200, description = "Contact API is up")),
    tag = "Contact"
)]
#[get("")]
pub async fn contact_status() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Contact API is working",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// # Contact Form Submission
///
/// Validates the form, runs the email plausibility checker on the sender
/// address and stores the message when the address is accepted.
///
/// ## Responses
/// - **200 OK**: message stored; body carries its `id` and `timestamp`
/// - **400 Bad Request**:
///   - `VALIDATION_ERROR`: a form field is missing or out of bounds
///   - `EMAIL_REJECTED`: the address failed a plausibility check; the body
///     carries the `verdict` (with a `suggestion` for typos)
/// - **503 Service Unavailable**: the DNS resolver could not be used
///
/// ## Example Request
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "subject": "Collaboration",
///   "message": "Loved the analytical engine demo!"
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored"),
        (status = 400, description = "Invalid form or rejected email", body = Verdict),
        (status = 503, description = "Email verification unavailable")
    ),
    tag = "Contact"
)]
#[post("")]
pub async fn submit_contact(
    req: web::Json<ContactRequest>,
    checker: web::Data<EmailChecker>,
    inbox: web::Data<ContactInbox>,
) -> Result<HttpResponse, ApiError> {
    let contact = req.into_inner().validate().map_err(|message| {
        warn!(%message, "contact form failed validation");
        ApiError::Validation(message)
    })?;

    let verdict = checker.check(&contact.email).await?;
    if !verdict.is_valid() {
        warn!(reason = ?verdict.reason(), "contact email rejected");
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "EMAIL_REJECTED",
            "message": rejection_message(&verdict),
            "verdict": verdict,
        })));
    }

    let stored = inbox.push(contact);
    info!(id = %stored.id, from = %stored.name, subject = %stored.subject, "new contact message received");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Message received successfully!",
        "data": {
            "id": stored.id,
            "timestamp": stored.timestamp,
        }
    })))
}

/// # Email Plausibility Check
///
/// Runs the checker without submitting anything, so the form can flag a
/// bad address inline. Input that is not email-shaped (or longer than 254
/// characters) gets an `invalid-syntax` verdict without a DNS query.
/// Always answers `200` with the verdict, except when the resolver itself
/// is unavailable (`503`).
#[utoipa::path(
    post,
    path = "/api/contact/check-email",
    request_body = EmailCheckRequest,
    responses(
        (status = 200, description = "Verdict for the address", body = Verdict),
        (status = 503, description = "Email verification unavailable")
    ),
    tag = "Contact"
)]
#[post("/check-email")]
pub async fn check_email(
    req: web::Json<EmailCheckRequest>,
    checker: web::Data<EmailChecker>,
) -> Result<HttpResponse, ApiError> {
    let email = req.email.trim();
    if !is_email_shaped(email) {
        return Ok(HttpResponse::Ok().json(Verdict::invalid_syntax()));
    }

    let verdict = checker.check(email).await?;
    Ok(HttpResponse::Ok().json(verdict))
}

#[utoipa::path(
    get,
    path = "/api/contact/messages",
    responses(
        (status = 200, description = "Stored messages, newest first"),
        (status = 401, description = "Missing or invalid admin token")
    ),
    tag = "Contact"
)]
#[get("/messages")]
pub async fn list_messages(
    _session: AdminSession,
    inbox: web::Data<ContactInbox>,
) -> Result<HttpResponse, ApiError> {
    let messages = inbox.newest_first();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": messages.len(),
        "data": messages,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/contact/messages/{id}",
    params(("id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact"
)]
#[delete("/messages/{id}")]
pub async fn delete_message(
    session: AdminSession,
    path: web::Path<String>,
    inbox: web::Data<ContactInbox>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !inbox.remove(&id) {
        return Err(ApiError::NotFound("Message not found".into()));
    }

    info!(%id, admin = %session.0.sub, "contact message deleted");
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Message deleted successfully",
    })))
}

#[utoipa::path(
    patch,
    path = "/api/contact/messages/{id}/read",
    params(("id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message marked as read"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact"
)]
#[patch("/messages/{id}/read")]
pub async fn mark_message_read(
    _session: AdminSession,
    path: web::Path<String>,
    inbox: web::Data<ContactInbox>,
) -> Result<HttpResponse, ApiError> {
    let message = inbox
        .mark_read(&path)
        .ok_or_else(|| ApiError::NotFound("Message not found".into()))?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": message,
    })))
}

/// Registers the contact routes under `/contact`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(contact_status)
            .service(submit_contact)
            .service(check_email)
            .service(list_messages)
            .service(delete_message)
            .service(mark_message_read),
    );
}
