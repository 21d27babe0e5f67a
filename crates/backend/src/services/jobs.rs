//! Job query building and the applied-jobs fan-out.
//!
//! Keeps filter construction out of the HTTP handlers so it can be tested
//! without a server.

use std::collections::BTreeSet;

use anyhow::Result;
use jobspring_types::{Job, JobListQuery};
use uuid::Uuid;

use crate::repository::{JobBoardStore, JobFilter, Page, MAX_PAGE_SIZE};

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Filter for `/get-all-jobs` and `/get-jobs-count`.
pub fn filter_from_query(query: &JobListQuery) -> JobFilter {
    JobFilter {
        category: non_blank(query.category.as_deref()),
        title: non_blank(query.search.as_deref()),
    }
}

pub fn page_from_query(query: &JobListQuery) -> Page {
    Page::new(query.page, query.size)
}

/// Filter and window for `/search?title=`. A blank title matches every job.
pub fn title_search(title: &str) -> (JobFilter, Page) {
    let filter = JobFilter {
        category: None,
        title: non_blank(Some(title)),
    };
    (filter, Page::new(None, Some(MAX_PAGE_SIZE)))
}

/// Jobs a user has applied to.
///
/// Two round trips: the user's applications, then one batched lookup of the
/// distinct job ids they reference.
pub async fn applied_jobs(store: &dyn JobBoardStore, uid: &str) -> Result<Vec<Job>> {
    let applications = store.list_applications_by_user(uid).await?;

    let job_ids: Vec<Uuid> = applications
        .iter()
        .map(|application| application.job_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if job_ids.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!("Fetching {} applied jobs for uid {}", job_ids.len(), uid);

    store.list_jobs_by_ids(&job_ids).await
}
