//! In-memory `JobBoardStore` for handler tests.
//!
//! Mirrors the PostgreSQL store's semantics (unique emails, unique
//! applications, newest-first ordering) and counts every call so tests can
//! assert that a rejected request never reached the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use jobspring_types::{Application, BlogPost, Job, JobSummary, Testimonial, User};
use uuid::Uuid;

use crate::models::{JobChanges, NewApplication, NewJob, NewUser};
use crate::repository::{InsertOutcome, JobBoardStore, JobFilter, Page};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    blog_posts: Vec<BlogPost>,
    testimonials: Vec<Testimonial>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Collections>,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    pub fn seed_job(&self, job: Job) {
        self.data.lock().unwrap().jobs.push(job);
    }

    pub fn seed_application(&self, application: Application) {
        self.data.lock().unwrap().applications.push(application);
    }

    pub fn seed_blog_post(&self, post: BlogPost) {
        self.data.lock().unwrap().blog_posts.push(post);
    }

    pub fn seed_testimonial(&self, testimonial: Testimonial) {
        self.data.lock().unwrap().testimonials.push(testimonial);
    }

    pub fn user_count(&self) -> usize {
        self.data.lock().unwrap().users.len()
    }

    pub fn application_count(&self) -> usize {
        self.data.lock().unwrap().applications.len()
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches(filter: &JobFilter, job: &Job) -> bool {
    let category_ok = filter
        .category
        .as_ref()
        .map_or(true, |category| &job.job_type == category);
    let title_ok = filter.title.as_ref().map_or(true, |term| {
        job.job_title.to_lowercase().contains(&term.to_lowercase())
    });
    category_ok && title_ok
}

fn newest_first(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn newest_applied_first(applications: &mut [Application]) {
    applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
}

fn apply_changes(job: &mut Job, changes: JobChanges) {
    if let Some(v) = changes.job_title {
        job.job_title = v;
    }
    if let Some(v) = changes.job_type {
        job.job_type = v;
    }
    if let Some(v) = changes.company_thumb {
        job.company_thumb = Some(v);
    }
    if let Some(v) = changes.job_description {
        job.job_description = v;
    }
    if let Some(v) = changes.salary_min {
        job.salary_min = Some(v);
    }
    if let Some(v) = changes.salary_max {
        job.salary_max = Some(v);
    }
    if let Some(v) = changes.publisher {
        job.publisher = v;
    }
    if let Some(v) = changes.publisher_name {
        job.publisher_name = Some(v);
    }
    if let Some(v) = changes.deadline {
        job.deadline = Some(v);
    }
}

#[async_trait]
impl JobBoardStore for MemoryStore {
    async fn find_user_by_uid(&self, uid: &str) -> Result<Option<User>> {
        self.record();
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.uid == uid).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<InsertOutcome<User>> {
        self.record();
        let mut data = self.data.lock().unwrap();
        if data.users.iter().any(|u| u.email == user.email) {
            return Ok(InsertOutcome::Duplicate);
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            uid: user.uid,
            email: user.email,
            name: user.name,
            photo_url: user.photo_url,
            created_at: now,
            updated_at: now,
        };
        data.users.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn upsert_user_by_email(&self, user: NewUser) -> Result<User> {
        self.record();
        let mut data = self.data.lock().unwrap();
        let now = Utc::now();

        if let Some(existing) = data.users.iter_mut().find(|u| u.email == user.email) {
            existing.uid = user.uid;
            if let Some(name) = user.name {
                existing.name = Some(name);
            }
            if let Some(photo_url) = user.photo_url {
                existing.photo_url = Some(photo_url);
            }
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = User {
            id: Uuid::new_v4(),
            uid: user.uid,
            email: user.email,
            name: user.name,
            photo_url: user.photo_url,
            created_at: now,
            updated_at: now,
        };
        data.users.push(created.clone());
        Ok(created)
    }

    async fn list_jobs(&self, filter: &JobFilter, page: Page) -> Result<Vec<JobSummary>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut jobs: Vec<Job> = data
            .jobs
            .iter()
            .filter(|job| matches(filter, job))
            .cloned()
            .collect();
        newest_first(&mut jobs);

        Ok(jobs
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .map(JobSummary::from)
            .collect())
    }

    async fn count_jobs(&self, filter: &JobFilter) -> Result<i64> {
        self.record();
        let data = self.data.lock().unwrap();
        Ok(data.jobs.iter().filter(|job| matches(filter, job)).count() as i64)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>> {
        self.record();
        let data = self.data.lock().unwrap();
        Ok(data.jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn list_jobs_by_publisher(&self, publisher: &str) -> Result<Vec<Job>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut jobs: Vec<Job> = data
            .jobs
            .iter()
            .filter(|job| job.publisher == publisher)
            .cloned()
            .collect();
        newest_first(&mut jobs);
        Ok(jobs)
    }

    async fn list_jobs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Job>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut jobs: Vec<Job> = data
            .jobs
            .iter()
            .filter(|job| ids.contains(&job.id))
            .cloned()
            .collect();
        newest_first(&mut jobs);
        Ok(jobs)
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job> {
        self.record();
        let created = Job {
            id: Uuid::new_v4(),
            job_title: job.job_title,
            job_type: job.job_type,
            company_thumb: job.company_thumb,
            job_description: job.job_description,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            publisher: job.publisher,
            publisher_name: job.publisher_name,
            published_at: Utc::now(),
            deadline: job.deadline,
            applicants: 0,
        };
        self.data.lock().unwrap().jobs.push(created.clone());
        Ok(created)
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        self.record();
        let mut data = self.data.lock().unwrap();
        let Some(job) = data.jobs.iter_mut().find(|job| job.id == id) else {
            return Ok(None);
        };
        apply_changes(job, changes);
        Ok(Some(job.clone()))
    }

    async fn increment_applicants(&self, id: Uuid) -> Result<Option<Job>> {
        self.record();
        let mut data = self.data.lock().unwrap();
        let Some(job) = data.jobs.iter_mut().find(|job| job.id == id) else {
            return Ok(None);
        };
        job.applicants += 1;
        Ok(Some(job.clone()))
    }

    async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<InsertOutcome<Application>> {
        self.record();
        let mut data = self.data.lock().unwrap();
        if data
            .applications
            .iter()
            .any(|a| a.uid == application.uid && a.job_id == application.job_id)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        let created = Application {
            id: Uuid::new_v4(),
            uid: application.uid,
            job_id: application.job_id,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            resume_url: application.resume_url,
            applied_at: Utc::now(),
        };
        data.applications.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn list_applications_by_user(&self, uid: &str) -> Result<Vec<Application>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut applications: Vec<Application> = data
            .applications
            .iter()
            .filter(|a| a.uid == uid)
            .cloned()
            .collect();
        newest_applied_first(&mut applications);
        Ok(applications)
    }

    async fn list_applications_by_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut applications: Vec<Application> = data
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        newest_applied_first(&mut applications);
        Ok(applications)
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut posts = data.blog_posts.clone();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn find_blog_post(&self, id: Uuid) -> Result<Option<BlogPost>> {
        self.record();
        let data = self.data.lock().unwrap();
        Ok(data.blog_posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.record();
        let data = self.data.lock().unwrap();
        let mut testimonials = data.testimonials.clone();
        testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(testimonials)
    }
}
