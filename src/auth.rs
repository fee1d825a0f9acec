use crate::config::AdminCredentials;
use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::future::{Ready, ready};
use thiserror::Error;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("admin login is not configured")]
    NotConfigured,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token lifetime of {0} hours is out of range")]
    Lifetime(i64),
}

/// Issues and verifies admin session tokens for the single configured
/// account.
#[derive(Clone)]
pub struct AdminAuth {
    credentials: Option<AdminCredentials>,
    ttl_hours: i64,
}

impl AdminAuth {
    pub fn new(credentials: Option<AdminCredentials>, ttl_hours: i64) -> Self {
        Self {
            credentials,
            ttl_hours,
        }
    }

    fn credentials(&self) -> Result<&AdminCredentials, AuthError> {
        self.credentials.as_ref().ok_or(AuthError::NotConfigured)
    }

    /// Checks the username/password pair and returns a signed HS256 token.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let credentials = self.credentials()?;

        // Evaluate both so a wrong username costs the same as a wrong password.
        let user_ok = digest_eq(&credentials.username, username);
        let password_ok = password_matches(&credentials.password, password);
        if !(user_ok && password_ok) {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let expires = Duration::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::Lifetime(self.ttl_hours))?;
        let claims = Claims {
            sub: credentials.username.clone(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(credentials.jwt_secret.as_bytes()),
        )
        .map_err(AuthError::Signing)
    }

    /// Decodes a token, checking signature, expiry and the admin role.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let credentials = self.credentials()?;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(credentials.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(AuthError::InvalidToken)?;

        if data.claims.role != ADMIN_ROLE {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(data.claims)
    }
}

fn digest_eq(expected: &str, supplied: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(supplied.as_bytes())
}

fn password_matches(configured: &str, supplied: &str) -> bool {
    if configured.starts_with("$2") {
        bcrypt::verify(supplied, configured).unwrap_or(false)
    } else {
        digest_eq(configured, supplied)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor guarding admin-only handlers.
///
/// Requires `web::Data<AdminAuth>` in the app data and a valid bearer token.
#[derive(Debug)]
pub struct AdminSession(pub Claims);

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminSession, ApiError> {
    let auth = req
        .app_data::<web::Data<AdminAuth>>()
        .ok_or_else(|| ApiError::Internal("Admin authentication is not wired".into()))?;
    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    Ok(AdminSession(auth.verify(token)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn credentials(password: &str) -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            password: password.to_string(),
            jwt_secret: "test-secret-key-for-testing".to_string(),
        }
    }

    fn auth() -> AdminAuth {
        AdminAuth::new(Some(credentials("correct horse")), 24)
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let auth = auth();
        let token = auth.login("admin", "correct horse").unwrap();
        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_login_with_unrepresentable_lifetime() {
        let auth = AdminAuth::new(Some(credentials("correct horse")), 10_000_000_000);
        assert!(matches!(
            auth.login("admin", "correct horse"),
            Err(AuthError::Lifetime(10_000_000_000))
        ));

        let auth = AdminAuth::new(Some(credentials("correct horse")), i64::MAX);
        assert!(auth.login("admin", "correct horse").is_err());
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        assert!(matches!(
            auth().login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_rejects_wrong_username() {
        assert!(matches!(
            auth().login("root", "correct horse"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_without_configuration() {
        let auth = AdminAuth::new(None, 24);
        assert!(matches!(
            auth.login("admin", "x"),
            Err(AuthError::NotConfigured)
        ));
        assert!(matches!(auth.verify("x.y.z"), Err(AuthError::NotConfigured)));
    }

    #[test]
    fn test_bcrypt_password() {
        let hashed = bcrypt::hash("s3cret", 4).unwrap();
        let auth = AdminAuth::new(Some(credentials(&hashed)), 1);
        assert!(auth.login("admin", "s3cret").is_ok());
        assert!(auth.login("admin", "S3cret").is_err());
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = AdminAuth::new(
            Some(AdminCredentials {
                jwt_secret: "another-secret".to_string(),
                ..credentials("correct horse")
            }),
            24,
        );
        let token = other.login("admin", "correct horse").unwrap();
        assert!(matches!(
            auth().verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".into(),
            role: ADMIN_ROLE.into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();
        assert!(matches!(
            auth().verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_non_admin_role() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "visitor".into(),
            role: "viewer".into(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();
        assert!(auth().verify(&token).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[actix_web::test]
    async fn test_admin_session_extractor() {
        let auth = auth();
        let token = auth.login("admin", "correct horse").unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(auth.clone()))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();
        let session = AdminSession::extract(&req).await.unwrap();
        assert_eq!(session.0.sub, "admin");

        let req = TestRequest::default()
            .app_data(web::Data::new(auth))
            .to_http_request();
        let err = AdminSession::extract(&req).await.unwrap_err();
        assert_eq!(err.to_string(), "No token provided");
    }
}
