use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const TITLE_LEN: (usize, usize) = (3, 200);
const DESCRIPTION_LEN: (usize, usize) = (10, 2000);
const SKILL_NAME_LEN: (usize, usize) = (2, 100);
const LEVEL_RANGE: (f64, f64) = (0.0, 100.0);

/// Project body for create and update. Optional at the serde level so a
/// missing field is reported by [`ProjectRequest::validate`].
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// A project body that passed validation. Optional fields left as `None`
/// keep their stored value on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
}

impl ProjectRequest {
    pub fn validate(self) -> Result<ProjectDraft, String> {
        Ok(ProjectDraft {
            title: required("title", self.title, TITLE_LEN)?,
            description: required("description", self.description, DESCRIPTION_LEN)?,
            image: optional_uri("image", self.image)?,
            live_url: optional_uri("liveUrl", self.live_url)?,
            github_url: optional_uri("githubUrl", self.github_url)?,
            tags: self.tags,
            category: required("category", self.category, (1, usize::MAX))?,
            featured: self.featured,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub live_url: String,
    pub github_url: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SkillRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub level: f64,
    pub icon: Option<String>,
}

impl SkillRequest {
    pub fn validate(self) -> Result<SkillDraft, String> {
        let name = required("name", self.name, SKILL_NAME_LEN)?;
        let category = required("category", self.category, (1, usize::MAX))?;

        let (min, max) = LEVEL_RANGE;
        let level = match self.level {
            None => return Err("\"level\" is required".to_string()),
            Some(level) if level < min => {
                return Err(format!("\"level\" must be greater than or equal to {min}"));
            }
            Some(level) if level > max => {
                return Err(format!("\"level\" must be less than or equal to {max}"));
            }
            Some(level) => level,
        };

        Ok(SkillDraft {
            name,
            category,
            level,
            icon: self.icon,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub level: f64,
    pub icon: String,
}

/// Admin dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: usize,
    pub total_skills: usize,
    pub featured_projects: usize,
    /// Up to five most recently added projects, newest first.
    pub recent_projects: Vec<Project>,
}

fn required(field: &str, value: Option<String>, (min, max): (usize, usize)) -> Result<String, String> {
    let Some(value) = value else {
        return Err(format!("\"{field}\" is required"));
    };

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

// Empty strings are allowed and clear the link.
fn optional_uri(field: &str, value: Option<String>) -> Result<Option<String>, String> {
    match value {
        Some(uri) if !uri.is_empty() && !is_uri(&uri) => {
            Err(format!("\"{field}\" must be a valid uri"))
        }
        other => Ok(other),
    }
}

/// Absolute URI: a scheme, `:`, and a non-empty remainder without
/// whitespace.
fn is_uri(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectRequest {
        ProjectRequest {
            title: Some("Crime Trends".into()),
            description: Some("Dashboard of crime patterns across cities".into()),
            category: Some("data-analysis".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_project_is_valid() {
        let draft = project().validate().unwrap();
        assert_eq!(draft.title, "Crime Trends");
        assert_eq!(draft.tags, None);
        assert_eq!(draft.featured, None);
    }

    #[test]
    fn test_project_required_fields() {
        let err = ProjectRequest::default().validate().unwrap_err();
        assert_eq!(err, "\"title\" is required");

        let err = ProjectRequest {
            category: None,
            ..project()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"category\" is required");

        let err = ProjectRequest {
            description: Some("too short".into()),
            ..project()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"description\" length must be at least 10 characters long");
    }

    #[test]
    fn test_project_links() {
        let draft = ProjectRequest {
            live_url: Some("https://example.com/demo".into()),
            github_url: Some(String::new()),
            ..project()
        }
        .validate()
        .unwrap();
        assert_eq!(draft.live_url.as_deref(), Some("https://example.com/demo"));
        assert_eq!(draft.github_url.as_deref(), Some(""));

        let err = ProjectRequest {
            github_url: Some("github.com/someone".into()),
            ..project()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"githubUrl\" must be a valid uri");

        assert!(!is_uri("/assets/images/crime.jpg"));
        assert!(!is_uri("https://exa mple.com"));
        assert!(is_uri("mailto:ada@example.com"));
    }

    #[test]
    fn test_project_request_uses_camel_case() {
        let json = r#"{"title": "Weather App", "description": "Seven day forecasts", "category": "python", "liveUrl": "https://w.example.com", "featured": true}"#;
        let req: ProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.live_url.as_deref(), Some("https://w.example.com"));
        assert_eq!(req.featured, Some(true));
    }

    #[test]
    fn test_skill_validation() {
        let skill = SkillRequest {
            name: Some("Rust".into()),
            category: Some("programming".into()),
            level: Some(85.0),
            icon: None,
        };
        let draft = skill.validate().unwrap();
        assert_eq!(draft.level, 85.0);

        let err = SkillRequest {
            name: Some("Rust".into()),
            category: Some("programming".into()),
            level: Some(101.0),
            icon: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"level\" must be less than or equal to 100");

        let err = SkillRequest {
            name: Some("R".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"name\" length must be at least 2 characters long");

        let err = SkillRequest {
            name: Some("Rust".into()),
            category: Some("programming".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, "\"level\" is required");
    }
}
