//! Wire and storage types shared by the Job Spring server and its CLI.
//!
//! Every type serializes with camelCase keys, which is what the web client
//! sends and expects. Row types derive `Queryable` behind the `diesel`
//! feature so the server can load them straight from PostgreSQL; their field
//! order matches the column order of the tables exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Users
// ============================================================================

/// User struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Identity id issued by the external sign-in provider
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /users` and `PUT /users`.
///
/// On upsert, `name` and `photoUrl` left out of the body keep their stored
/// values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(length(min = 1, max = 128))]
    pub uid: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,
}

// ============================================================================
// Session tokens
// ============================================================================

/// Identity payload signed into a session token by `POST /jwt`.
///
/// Keys other than `uid` and `email` are kept and signed as extra claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 128))]
    pub uid: String,

    #[validate(email)]
    pub email: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Jobs
// ============================================================================

/// Job struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub job_title: String,
    /// Category, e.g. "On Site", "Remote", "Hybrid" or "Part-Time"
    pub job_type: String,
    pub company_thumb: Option<String>,
    pub job_description: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    /// Email of the user who published the job; the job's owner
    pub publisher: String,
    pub publisher_name: Option<String>,
    pub published_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub applicants: i32,
}

/// List-view projection of a [`Job`] without the description and thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub job_title: String,
    pub job_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub publisher: String,
    pub publisher_name: Option<String>,
    pub published_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub applicants: i32,
}

impl From<Job> for JobSummary {
    fn from(job: Job) -> Self {
        JobSummary {
            id: job.id,
            job_title: job.job_title,
            job_type: job.job_type,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            publisher: job.publisher,
            publisher_name: job.publisher_name,
            published_at: job.published_at,
            deadline: job.deadline,
            applicants: job.applicants,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_salary"))]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub job_title: String,

    #[validate(length(min = 1, max = 50))]
    pub job_type: String,

    #[validate(url)]
    pub company_thumb: Option<String>,

    #[validate(length(min = 1, max = 20000))]
    pub job_description: String,

    #[validate(range(min = 0))]
    pub salary_min: Option<i32>,

    #[validate(range(min = 0))]
    pub salary_max: Option<i32>,

    #[validate(email)]
    pub publisher: String,

    #[validate(length(max = 200))]
    pub publisher_name: Option<String>,

    pub deadline: Option<DateTime<Utc>>,
}

/// Partial job update: fields left out keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_salary"))]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub job_title: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub job_type: Option<String>,

    #[validate(url)]
    pub company_thumb: Option<String>,

    #[validate(length(min = 1, max = 20000))]
    pub job_description: Option<String>,

    #[validate(range(min = 0))]
    pub salary_min: Option<i32>,

    #[validate(range(min = 0))]
    pub salary_max: Option<i32>,

    #[validate(email)]
    pub publisher: Option<String>,

    #[validate(length(max = 200))]
    pub publisher_name: Option<String>,

    pub deadline: Option<DateTime<Utc>>,
}

fn salary_range(min: Option<i32>, max: Option<i32>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("salary_range")),
        _ => Ok(()),
    }
}

fn validate_create_salary(req: &CreateJobRequest) -> Result<(), ValidationError> {
    salary_range(req.salary_min, req.salary_max)
}

fn validate_update_salary(req: &UpdateJobRequest) -> Result<(), ValidationError> {
    salary_range(req.salary_min, req.salary_max)
}

/// Query parameters for listing and counting jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListQuery {
    /// Exact `jobType` to keep
    pub category: Option<String>,
    /// Case-insensitive substring of `jobTitle`
    pub search: Option<String>,
    /// Zero-based page number
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCountResponse {
    pub count: i64,
}

// ============================================================================
// Applications
// ============================================================================

/// Application struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub uid: String,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_url: String,
    pub applied_at: DateTime<Utc>,
}

/// Body of `POST /apply-job`.
///
/// `uid` may be omitted; the applicant is always the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobRequest {
    pub job_id: Uuid,

    pub uid: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub applicant_name: String,

    #[validate(email)]
    pub applicant_email: String,

    #[validate(url)]
    pub resume_url: String,
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: Option<String>,
    pub body: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub designation: Option<String>,
    pub quote: String,
    /// 1 to 5 stars when given
    pub rating: Option<i32>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_job_request() -> CreateJobRequest {
        CreateJobRequest {
            job_title: "Senior Engineer".to_string(),
            job_type: "Remote".to_string(),
            company_thumb: Some("https://cdn.example.com/acme.png".to_string()),
            job_description: "Build things.".to_string(),
            salary_min: Some(90_000),
            salary_max: Some(120_000),
            publisher: "hr@acme.io".to_string(),
            publisher_name: Some("Acme HR".to_string()),
            deadline: None,
        }
    }

    #[test]
    fn test_create_job_request_valid() {
        assert!(create_job_request().validate().is_ok());
    }

    #[test]
    fn test_create_job_request_rejects_inverted_salary() {
        let mut req = create_job_request();
        req.salary_min = Some(200_000);

        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn test_create_job_request_rejects_bad_publisher() {
        let mut req = create_job_request();
        req.publisher = "not-an-email".to_string();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("publisher"));
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateJobRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let req = UpdateJobRequest {
            job_title: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_job_wire_format_is_camel_case() {
        let body = json!({
            "jobTitle": "Designer",
            "jobType": "Hybrid",
            "jobDescription": "Draw things.",
            "publisher": "hr@acme.io"
        });

        let req: CreateJobRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.job_title, "Designer");
        assert_eq!(req.job_type, "Hybrid");
        assert_eq!(req.company_thumb, None);
    }

    #[test]
    fn test_token_request_keeps_extra_claims() {
        let body = json!({
            "uid": "u-1",
            "email": "ada@example.com",
            "role": "seeker",
        });

        let req: TokenRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.uid, "u-1");
        assert_eq!(req.extra.get("role"), Some(&json!("seeker")));
        assert!(!req.extra.contains_key("uid"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_token_request_requires_email() {
        let req = TokenRequest {
            uid: "u-1".to_string(),
            email: "nope".to_string(),
            extra: Default::default(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_apply_request_requires_resume_url() {
        let req = ApplyJobRequest {
            job_id: Uuid::new_v4(),
            uid: None,
            applicant_name: "Ada".to_string(),
            applicant_email: "ada@example.com".to_string(),
            resume_url: "resume.pdf".to_string(),
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("resume_url"));
    }

    #[test]
    fn test_job_summary_drops_large_fields() {
        let job = Job {
            id: Uuid::new_v4(),
            job_title: "Senior Engineer".to_string(),
            job_type: "Remote".to_string(),
            company_thumb: Some("https://cdn.example.com/acme.png".to_string()),
            job_description: "Build things.".to_string(),
            salary_min: None,
            salary_max: None,
            publisher: "hr@acme.io".to_string(),
            publisher_name: None,
            published_at: Utc::now(),
            deadline: None,
            applicants: 3,
        };

        let value = serde_json::to_value(JobSummary::from(job)).unwrap();
        assert!(value.get("jobDescription").is_none());
        assert!(value.get("companyThumb").is_none());
        assert_eq!(value["applicants"], json!(3));
    }
}
