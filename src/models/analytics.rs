use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageViewRequest {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub visitor_id: Option<String>,
}

/// Project ids arrive either as strings or numbers from the frontend.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectViewRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub project_id: Option<Value>,
    #[serde(default)]
    pub project_title: Option<String>,
}

impl ProjectViewRequest {
    /// The project id as a map key, if one was supplied.
    pub fn project_key(&self) -> Option<String> {
        match self.project_id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectViews {
    pub title: Option<String>,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub page_views: u64,
    pub contact_form_submissions: u64,
    pub project_views: BTreeMap<String, ProjectViews>,
    pub unique_visitors: usize,
    pub last_reset: String,
}
