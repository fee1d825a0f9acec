use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const NAME_LEN: (usize, usize) = (2, 100);
const SUBJECT_LEN: (usize, usize) = (3, 200);
const MESSAGE_LEN: (usize, usize) = (10, 2000);
const DEFAULT_SUBJECT: &str = "No subject";

/// Contact form body. Fields are optional at the serde level so that a
/// missing field yields a readable validation message instead of a
/// deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A contact request that passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Checks field presence, lengths and the coarse email shape, reporting
    /// the first failing field.
    pub fn validate(self) -> Result<ValidContact, String> {
        let name = required("name", self.name, NAME_LEN)?;

        let email = match self.email {
            None => return Err("\"email\" is required".to_string()),
            Some(email) if email.is_empty() => {
                return Err("\"email\" is not allowed to be empty".to_string());
            }
            Some(email) if !is_email_shaped(&email) => {
                return Err("\"email\" must be a valid email".to_string());
            }
            Some(email) => email,
        };

        let subject = match self.subject {
            Some(subject) => bounded("subject", subject, SUBJECT_LEN)?,
            None => DEFAULT_SUBJECT.to_string(),
        };

        let message = required("message", self.message, MESSAGE_LEN)?;

        Ok(ValidContact {
            name,
            email,
            subject,
            message,
        })
    }
}

fn required(field: &str, value: Option<String>, limits: (usize, usize)) -> Result<String, String> {
    match value {
        Some(value) => bounded(field, value, limits),
        None => Err(format!("\"{field}\" is required")),
    }
}

fn bounded(field: &str, value: String, (min, max): (usize, usize)) -> Result<String, String> {
    let len = value.chars().count();
    if len == 0 {
        Err(format!("\"{field}\" is not allowed to be empty"))
    } else if len < min {
        Err(format!("\"{field}\" length must be at least {min} characters long"))
    } else if len > max {
        Err(format!(
            "\"{field}\" length must be less than or equal to {max} characters long"
        ))
    } else {
        Ok(value)
    }
}

/// Coarse email shape: one `@`, a non-empty local part and a dotted domain
/// with a top-level label of at least two characters, no whitespace.
pub fn is_email_shaped(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.last().is_some_and(|tld| tld.chars().count() >= 2)
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
    pub read: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailCheckRequest {
    pub email: String,
}
