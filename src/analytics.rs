use crate::models::analytics::{AnalyticsSnapshot, ProjectViews};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Counters {
    page_views: u64,
    contact_submissions: u64,
    project_views: BTreeMap<String, ProjectViews>,
    visitors: HashSet<String>,
    last_reset: DateTime<Utc>,
}

impl Counters {
    fn fresh() -> Self {
        Self {
            page_views: 0,
            contact_submissions: 0,
            project_views: BTreeMap::new(),
            visitors: HashSet::new(),
            last_reset: Utc::now(),
        }
    }
}

/// Page, project and contact counters kept in memory until the next reset.
#[derive(Debug)]
pub struct AnalyticsStore {
    counters: Mutex<Counters>,
}

impl Default for AnalyticsStore {
    fn default() -> Self {
        Self {
            counters: Mutex::new(Counters::fresh()),
        }
    }
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts a page view and returns the running total.
    pub fn record_page_view(&self, visitor_id: Option<&str>) -> u64 {
        let mut counters = self.lock();
        counters.page_views += 1;
        if let Some(visitor) = visitor_id.filter(|v| !v.is_empty()) {
            counters.visitors.insert(visitor.to_string());
        }
        counters.page_views
    }

    /// Counts a view of one project and returns that project's total. The
    /// title is remembered from the first view that carries one.
    pub fn record_project_view(&self, project_id: &str, title: Option<&str>) -> u64 {
        let mut counters = self.lock();
        let entry = counters
            .project_views
            .entry(project_id.to_string())
            .or_insert_with(|| ProjectViews {
                title: None,
                views: 0,
            });
        if entry.title.is_none() {
            entry.title = title.map(str::to_string);
        }
        entry.views += 1;
        entry.views
    }

    pub fn record_contact_submission(&self) -> u64 {
        let mut counters = self.lock();
        counters.contact_submissions += 1;
        counters.contact_submissions
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let counters = self.lock();
        AnalyticsSnapshot {
            page_views: counters.page_views,
            contact_form_submissions: counters.contact_submissions,
            project_views: counters.project_views.clone(),
            unique_visitors: counters.visitors.len(),
            last_reset: counters.last_reset.to_rfc3339(),
        }
    }

    pub fn reset(&self) {
        *self.lock() = Counters::fresh();
    }
}
