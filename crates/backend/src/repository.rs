//! Store abstraction for the job board collections.
//!
//! Handlers only see [`JobBoardStore`]; the server wires in [`PgStore`],
//! tests wire in the in-memory store. Each method is one round trip to the
//! store, no method spans a transaction.

use anyhow::Result;
use async_trait::async_trait;
use jobspring_types::{Application, BlogPost, Job, JobSummary, Testimonial, User};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::models::{JobChanges, NewApplication, NewJob, NewUser};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Filter shared by job listing and counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Exact `job_type`
    pub category: Option<String>,
    /// Case-insensitive substring of `job_title`
    pub title: Option<String>,
}

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn new(number: Option<i64>, size: Option<i64>) -> Self {
        Page {
            number: number.unwrap_or(0).max(0),
            size: size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

/// Outcome of inserting a record guarded by a unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    Created(T),
    Duplicate,
}

#[async_trait]
pub trait JobBoardStore: Send + Sync {
    async fn find_user_by_uid(&self, uid: &str) -> Result<Option<User>>;

    /// Insert a user; `Duplicate` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>>;

    /// Insert or merge by email. At most one record per email.
    async fn upsert_user_by_email(&self, user: NewUser) -> Result<User>;

    /// Filtered page of jobs, newest first.
    async fn list_jobs(&self, filter: &JobFilter, page: Page) -> Result<Vec<JobSummary>>;

    async fn count_jobs(&self, filter: &JobFilter) -> Result<i64>;

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>>;

    async fn list_jobs_by_publisher(&self, publisher: &str) -> Result<Vec<Job>>;

    /// Batched `id = ANY(ids)` lookup.
    async fn list_jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Job>>;

    async fn insert_job(&self, job: NewJob) -> Result<Job>;

    /// Shallow merge; `None` when no job has this id.
    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>>;

    async fn increment_applicants(&self, id: Uuid) -> Result<Option<Job>>;

    /// `Duplicate` when the user already applied to the job.
    async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<InsertOutcome<Application>>;

    async fn list_applications_by_user(&self, uid: &str) -> Result<Vec<Application>>;

    async fn list_applications_by_job(&self, job_id: Uuid) -> Result<Vec<Application>>;

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>>;

    async fn find_blog_post(&self, id: Uuid) -> Result<Option<BlogPost>>;

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl JobBoardStore for PgStore {
    async fn find_user_by_uid(&self, uid: &str) -> Result<Option<User>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::users::get_by_uid(&mut conn, uid).await
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>> {
        let mut conn = db::get_conn(&self.pool).await?;
        let created = db::users::create(&mut conn, &user).await?;
        Ok(created.map_or(InsertOutcome::Duplicate, InsertOutcome::Created))
    }

    async fn upsert_user_by_email(&self, user: NewUser) -> Result<User> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::users::upsert_by_email(&mut conn, &user).await
    }

    async fn list_jobs(&self, filter: &JobFilter, page: Page) -> Result<Vec<JobSummary>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::list(&mut conn, filter, page).await
    }

    async fn count_jobs(&self, filter: &JobFilter) -> Result<i64> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::count(&mut conn, filter).await
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::get_by_id(&mut conn, id).await
    }

    async fn list_jobs_by_publisher(&self, publisher: &str) -> Result<Vec<Job>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::list_by_publisher(&mut conn, publisher).await
    }

    async fn list_jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::list_by_ids(&mut conn, ids).await
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::create(&mut conn, &job).await
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::update(&mut conn, id, &changes).await
    }

    async fn increment_applicants(&self, id: Uuid) -> Result<Option<Job>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::jobs::increment_applicants(&mut conn, id).await
    }

    async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<InsertOutcome<Application>> {
        let mut conn = db::get_conn(&self.pool).await?;
        let created = db::applications::create(&mut conn, &application).await?;
        Ok(created.map_or(InsertOutcome::Duplicate, InsertOutcome::Created))
    }

    async fn list_applications_by_user(&self, uid: &str) -> Result<Vec<Application>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::applications::list_by_user(&mut conn, uid).await
    }

    async fn list_applications_by_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::applications::list_by_job(&mut conn, job_id).await
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::content::list_blog_posts(&mut conn).await
    }

    async fn find_blog_post(&self, id: Uuid) -> Result<Option<BlogPost>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::content::get_blog_post(&mut conn, id).await
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::content::list_testimonials(&mut conn).await
    }
}
