use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_JWT_TTL_HOURS: i64 = 24;
const MAX_JWT_TTL_HOURS: i64 = 24 * 365;
const DEFAULT_DNS_TIMEOUT_SECS: u64 = 3;
const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// The single admin account allowed to log in.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Plain text, or a bcrypt hash when it starts with `$2`.
    pub password: String,
    pub jwt_secret: String,
}

/// # Service Configuration
///
/// Read once at startup from the process environment (after `.env` has been
/// loaded by `main`).
///
/// ## Variables
/// - `HOST` / `PORT`: bind address (default `127.0.0.1:5000`)
/// - `APP_ENV`: environment name reported by the health endpoint
/// - `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `JWT_SECRET`: admin login; when any
///   is missing, login stays disabled
/// - `JWT_TTL_HOURS`: session token lifetime (default 24, at most one year)
/// - `DNS_TIMEOUT_SECS`: bound on each MX lookup (default 3)
/// - `EXTRA_DISPOSABLE_DOMAINS`: comma separated domains added to the block list
/// - `CORS_ORIGINS`: comma separated browser origins allowed to call the API
///   (default `http://localhost:3000`); each must be an `http(s)://` origin
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub admin: Option<AdminCredentials>,
    pub jwt_ttl_hours: i64,
    pub dns_timeout: Duration,
    pub extra_disposable_domains: Vec<String>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let admin = match (
            value("ADMIN_USERNAME"),
            value("ADMIN_PASSWORD"),
            value("JWT_SECRET"),
        ) {
            (Some(username), Some(password), Some(jwt_secret)) => Some(AdminCredentials {
                username,
                password,
                jwt_secret,
            }),
            _ => None,
        };

        let jwt_ttl_hours = parse_or(value("JWT_TTL_HOURS"), "JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?;
        if !(1..=MAX_JWT_TTL_HOURS).contains(&jwt_ttl_hours) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_HOURS",
                value: jwt_ttl_hours.to_string(),
            });
        }

        let dns_timeout_secs = parse_or(
            value("DNS_TIMEOUT_SECS"),
            "DNS_TIMEOUT_SECS",
            DEFAULT_DNS_TIMEOUT_SECS,
        )?;
        if dns_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DNS_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let cors_origins = match value("CORS_ORIGINS") {
            Some(raw) => comma_list(&raw),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        if let Some(bad) = cors_origins.iter().find(|o| !is_origin(o)) {
            return Err(ConfigError::InvalidValue {
                key: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        Ok(Self {
            host: value("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(value("PORT"), "PORT", DEFAULT_PORT)?,
            environment: value("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            admin,
            jwt_ttl_hours,
            dns_timeout: Duration::from_secs(dns_timeout_secs),
            extra_disposable_domains: value("EXTRA_DISPOSABLE_DOMAINS")
                .map(|list| comma_list(&list))
                .unwrap_or_default(),
            cors_origins,
        })
    }
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Scheme plus host, no path and no wildcard.
fn is_origin(origin: &str) -> bool {
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    host.is_some_and(|host| {
        !host.is_empty()
            && !host.contains(['/', '*'])
            && !host.chars().any(|c| c.is_whitespace() || c.is_control())
    })
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
