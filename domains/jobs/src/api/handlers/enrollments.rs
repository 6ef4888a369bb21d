//! Enrollment API handlers

use axum::extract::State;
use jobboard_common::{ApiResponse, ApiResult, ResultExt, ValidatedPath};

use crate::api::middleware::JobsState;
use crate::domain::entities::{EnrollmentDetail, Job};

/// Enroll a client in a job listing
pub async fn enroll(
    State(state): State<JobsState>,
    ValidatedPath((job_id, client_id)): ValidatedPath<(i64, i64)>,
) -> ApiResult<EnrollmentDetail> {
    let enrollment = state
        .repos
        .enrollments
        .enroll(client_id, job_id)
        .await
        .or_fail("Could not enroll in the job listing")?;

    Ok(ApiResponse::ok(enrollment, "Enrolled successfully"))
}

/// Job listings a client is enrolled in
pub async fn list_enrolled_jobs(
    State(state): State<JobsState>,
    ValidatedPath(client_id): ValidatedPath<i64>,
) -> ApiResult<Vec<Job>> {
    let jobs = state
        .repos
        .enrollments
        .list_jobs_for_client(client_id)
        .await
        .or_fail("Could not retrieve the enrollments")?;

    Ok(ApiResponse::ok(jobs, "Enrollments retrieved"))
}
