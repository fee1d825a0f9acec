use crate::models::portfolio::{DashboardStats, Project, ProjectDraft, Skill, SkillDraft};
use chrono::Utc;
use std::sync::{PoisonError, RwLock};

const RECENT_PROJECTS: usize = 5;

#[derive(Debug, Default)]
struct Portfolio {
    projects: Vec<Project>,
    skills: Vec<Skill>,
}

/// In-process list of the projects and skills shown on the portfolio.
///
/// Starts empty and is edited through the admin routes; ids are assigned
/// as one past the current maximum.
#[derive(Debug, Default)]
pub struct PortfolioStore {
    inner: RwLock<Portfolio>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .projects
            .clone()
    }

    pub fn project(&self, id: u64) -> Option<Project> {
        let portfolio = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        portfolio.projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn add_project(&self, draft: ProjectDraft) -> Project {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let project = Project {
            id: next_id(portfolio.projects.iter().map(|p| p.id)),
            title: draft.title,
            description: draft.description,
            image: draft.image.unwrap_or_default(),
            live_url: draft.live_url.unwrap_or_default(),
            github_url: draft.github_url.unwrap_or_default(),
            tags: draft.tags.unwrap_or_default(),
            category: draft.category,
            featured: draft.featured.unwrap_or(false),
            created_at: Utc::now().to_rfc3339(),
            updated_at: None,
        };
        portfolio.projects.push(project.clone());
        project
    }

    /// Applies `draft` over the stored project; `None` when the id is
    /// unknown.
    pub fn update_project(&self, id: u64, draft: ProjectDraft) -> Option<Project> {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let project = portfolio.projects.iter_mut().find(|p| p.id == id)?;

        project.title = draft.title;
        project.description = draft.description;
        project.category = draft.category;
        if let Some(image) = draft.image {
            project.image = image;
        }
        if let Some(live_url) = draft.live_url {
            project.live_url = live_url;
        }
        if let Some(github_url) = draft.github_url {
            project.github_url = github_url;
        }
        if let Some(tags) = draft.tags {
            project.tags = tags;
        }
        if let Some(featured) = draft.featured {
            project.featured = featured;
        }
        project.updated_at = Some(Utc::now().to_rfc3339());

        Some(project.clone())
    }

    pub fn remove_project(&self, id: u64) -> Option<Project> {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let index = portfolio.projects.iter().position(|p| p.id == id)?;
        Some(portfolio.projects.remove(index))
    }

    pub fn skills(&self) -> Vec<Skill> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .skills
            .clone()
    }

    pub fn add_skill(&self, draft: SkillDraft) -> Skill {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let skill = Skill {
            id: next_id(portfolio.skills.iter().map(|s| s.id)),
            name: draft.name,
            category: draft.category,
            level: draft.level,
            icon: draft.icon.unwrap_or_default(),
        };
        portfolio.skills.push(skill.clone());
        skill
    }

    pub fn update_skill(&self, id: u64, draft: SkillDraft) -> Option<Skill> {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let skill = portfolio.skills.iter_mut().find(|s| s.id == id)?;

        skill.name = draft.name;
        skill.category = draft.category;
        skill.level = draft.level;
        if let Some(icon) = draft.icon {
            skill.icon = icon;
        }

        Some(skill.clone())
    }

    pub fn remove_skill(&self, id: u64) -> Option<Skill> {
        let mut portfolio = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let index = portfolio.skills.iter().position(|s| s.id == id)?;
        Some(portfolio.skills.remove(index))
    }

    pub fn dashboard(&self) -> DashboardStats {
        let portfolio = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        DashboardStats {
            total_projects: portfolio.projects.len(),
            total_skills: portfolio.skills.len(),
            featured_projects: portfolio.projects.iter().filter(|p| p.featured).count(),
            recent_projects: portfolio
                .projects
                .iter()
                .rev()
                .take(RECENT_PROJECTS)
                .cloned()
                .collect(),
        }
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}
