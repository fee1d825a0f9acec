/// Analytics counter requests and the snapshot returned to the dashboard.
pub mod analytics;

/// Admin login request and response bodies.
pub mod auth;

/// Contact form request, its validation rules and stored messages.
pub mod contact;

/// Project and skill bodies for the admin editor, with their validation.
pub mod portfolio;

/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for health check endpoints.
pub mod health;
