use axum::{
    extract::{Path, Query, State},
    Extension,
};
use jobspring_types::{
    Application, CreateJobRequest, Job, JobCountResponse, JobListQuery, JobSummary, SearchQuery,
    UpdateJobRequest,
};
use validator::Validate;

use crate::auth::{ownership, AuthUser};
use crate::error::ApiResult;
use crate::extract::Json;
use crate::models::{JobChanges, NewJob};
use crate::services::jobs as job_queries;
use crate::AppState;

use super::parse_id;

/// `GET /get-all-jobs?category=&search=&page=&size=`
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Json<Vec<JobSummary>>> {
    let filter = job_queries::filter_from_query(&query);
    let page = job_queries::page_from_query(&query);

    let jobs = state.store.list_jobs(&filter, page).await?;
    Ok(Json(jobs))
}

/// `GET /get-jobs-count?category=&search=`
pub async fn count_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Json<JobCountResponse>> {
    let filter = job_queries::filter_from_query(&query);

    let count = state.store.count_jobs(&filter).await?;
    Ok(Json(JobCountResponse { count }))
}

/// `GET /search?title=`
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<JobSummary>>> {
    let (filter, page) = job_queries::title_search(&query.title);

    let jobs = state.store.list_jobs(&filter, page).await?;
    Ok(Json(jobs))
}

/// `GET /job-details/:id`
pub async fn job_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Job>>> {
    let job_id = parse_id(&id)?;

    let job = state.store.find_job(job_id).await?;
    Ok(Json(job))
}

/// `GET /my-jobs/:uid`: jobs published under the caller's email.
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Vec<Job>>> {
    ownership::ensure_same_user(&user, &uid)?;

    let jobs = state.store.list_jobs_by_publisher(&user.email).await?;
    Ok(Json(jobs))
}

/// `POST /add-job`: the body's publisher must be the caller.
pub async fn add_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateJobRequest>,
) -> ApiResult<Json<Job>> {
    ownership::ensure_publisher(&user, &payload.publisher)?;
    payload.validate()?;

    let job = state.store.insert_job(NewJob::from(payload)).await?;

    tracing::info!("Job {} published by {}", job.id, job.publisher);
    Ok(Json(job))
}

/// `PATCH /update-my-job/:id`
pub async fn update_my_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateJobRequest>,
) -> ApiResult<Json<Option<Job>>> {
    let job_id = parse_id(&id)?;

    // Ownership cannot be handed to someone else
    if let Some(publisher) = &payload.publisher {
        ownership::ensure_publisher(&user, publisher)?;
    }

    if ownership::owned_job(state.store.as_ref(), &user, job_id)
        .await?
        .is_none()
    {
        return Ok(Json(None));
    }

    payload.validate()?;

    let updated = state
        .store
        .update_job(job_id, JobChanges::from(payload))
        .await?;

    Ok(Json(updated))
}

/// `PATCH /update-job-applicants/:id`: bump the applicant counter by one.
pub async fn update_job_applicants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Job>>> {
    let job_id = parse_id(&id)?;

    let updated = state.store.increment_applicants(job_id).await?;
    Ok(Json(updated))
}

/// `GET /job-applications/:id`: applications received by one of the caller's jobs.
pub async fn job_applications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Application>>> {
    let job_id = parse_id(&id)?;

    if ownership::owned_job(state.store.as_ref(), &user, job_id)
        .await?
        .is_none()
    {
        return Ok(Json(Vec::new()));
    }

    let applications = state.store.list_applications_by_job(job_id).await?;
    Ok(Json(applications))
}
