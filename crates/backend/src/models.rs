// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use jobspring_types::{CreateJobRequest, UpdateJobRequest, UserPayload};
use uuid::Uuid;

/// Insertable struct for new users
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl From<UserPayload> for NewUser {
    fn from(payload: UserPayload) -> Self {
        NewUser {
            uid: payload.uid,
            email: payload.email,
            name: payload.name,
            photo_url: payload.photo_url,
        }
    }
}

/// Fields written when an upsert hits an existing email.
/// `None` leaves the stored column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub uid: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&NewUser> for UserChanges {
    fn from(user: &NewUser) -> Self {
        UserChanges {
            uid: user.uid.clone(),
            name: user.name.clone(),
            photo_url: user.photo_url.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// Insertable struct for new jobs; `published_at` and `applicants` use column defaults
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob {
    pub job_title: String,
    pub job_type: String,
    pub company_thumb: Option<String>,
    pub job_description: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub publisher: String,
    pub publisher_name: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<CreateJobRequest> for NewJob {
    fn from(req: CreateJobRequest) -> Self {
        NewJob {
            job_title: req.job_title,
            job_type: req.job_type,
            company_thumb: req.company_thumb,
            job_description: req.job_description,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            publisher: req.publisher,
            publisher_name: req.publisher_name,
            deadline: req.deadline,
        }
    }
}

/// Shallow merge applied to a stored job
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
pub struct JobChanges {
    pub job_title: Option<String>,
    pub job_type: Option<String>,
    pub company_thumb: Option<String>,
    pub job_description: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub publisher: Option<String>,
    pub publisher_name: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl JobChanges {
    /// Diesel refuses an UPDATE with nothing to set.
    pub fn is_empty(&self) -> bool {
        self.job_title.is_none()
            && self.job_type.is_none()
            && self.company_thumb.is_none()
            && self.job_description.is_none()
            && self.salary_min.is_none()
            && self.salary_max.is_none()
            && self.publisher.is_none()
            && self.publisher_name.is_none()
            && self.deadline.is_none()
    }
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(req: UpdateJobRequest) -> Self {
        JobChanges {
            job_title: req.job_title,
            job_type: req.job_type,
            company_thumb: req.company_thumb,
            job_description: req.job_description,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            publisher: req.publisher,
            publisher_name: req.publisher_name,
            deadline: req.deadline,
        }
    }
}

/// Insertable struct for new applications
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::applications)]
pub struct NewApplication {
    pub uid: String,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_url: String,
}
