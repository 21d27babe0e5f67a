use axum::{
    extract::{Path, State},
    Extension,
};
use jobspring_types::{Application, ApplyJobRequest, Job};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::{ownership, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::Json;
use crate::models::NewApplication;
use crate::repository::InsertOutcome;
use crate::services::jobs as job_queries;
use crate::AppState;

/// `POST /apply-job`: the applicant is always the caller.
pub async fn apply_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ApplyJobRequest>,
) -> ApiResult<Json<Application>> {
    if let Some(uid) = &payload.uid {
        ownership::ensure_same_user(&user, uid)?;
    }
    payload.validate()?;

    if state.store.find_job(payload.job_id).await?.is_none() {
        let mut errors = ValidationErrors::new();
        errors.add("job_id", ValidationError::new("unknown_job"));
        return Err(errors.into());
    }

    let new_application = NewApplication {
        uid: user.uid.clone(),
        job_id: payload.job_id,
        applicant_name: payload.applicant_name,
        applicant_email: payload.applicant_email,
        resume_url: payload.resume_url,
    };

    match state.store.insert_application(new_application).await? {
        InsertOutcome::Created(application) => {
            tracing::info!(
                "User {} applied to job {}",
                application.uid,
                application.job_id
            );
            Ok(Json(application))
        }
        InsertOutcome::Duplicate => Err(ApiError::conflict(
            "You have already applied to this job",
        )),
    }
}

/// `GET /get-applied-jobs/:uid`
pub async fn applied_jobs(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = job_queries::applied_jobs(state.store.as_ref(), &uid).await?;
    Ok(Json(jobs))
}

/// `GET /get-applications/:uid`
pub async fn user_applications(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Vec<Application>>> {
    let applications = state.store.list_applications_by_user(&uid).await?;
    Ok(Json(applications))
}
