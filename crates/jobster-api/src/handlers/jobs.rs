//! Job resource handlers.
//!
//! Every handler validates the path id before touching the store: an id
//! that does not have the 24-hex shape answers 400, while a well-formed id
//! with no matching record answers 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use jobster_models::{Job, JobDraft, JobId, JobPatch};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/jobs
///
/// Returns:
/// - 200: all job listings as a JSON array
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.jobs.list().await?;
    Ok(Json(jobs))
}

/// POST /api/jobs
///
/// Returns:
/// - 201: created job
/// - 400: missing or empty required fields
pub async fn create_job(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let draft: JobDraft = parse_payload(body)?;
    draft
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let job = state.jobs.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs/:id
///
/// Returns:
/// - 200: the job
/// - 400: malformed id
/// - 404: no matching record
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = parse_job_id(&id)?;
    let job = state
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(job))
}

/// PUT /api/jobs/:id
///
/// Shallow merge: only supplied fields overwrite stored ones.
///
/// Returns:
/// - 200: the updated job
/// - 400: malformed id or malformed payload
/// - 404: no matching record
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Job>> {
    let id = parse_job_id(&id)?;
    let patch: JobPatch = parse_payload(body)?;

    let job = state
        .jobs
        .update(&id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(job))
}

/// DELETE /api/jobs/:id
///
/// Idempotent: deleting an already-absent record is still a success.
///
/// Returns:
/// - 204: empty body, whether or not the record existed
/// - 400: malformed id
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_job_id(&id)?;
    let removed = state.jobs.delete(&id).await?;
    if !removed {
        info!(id = %id, "delete on absent job");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Parse a path id, answering 400 for anything not shaped like a record id.
fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    JobId::parse(raw).map_err(|_| ApiError::bad_request("Invalid job id format"))
}

/// Deserialize a JSON body into a typed payload, answering 400 (not 422)
/// when fields are missing or mistyped.
pub(crate) fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(e.to_string()))
}
