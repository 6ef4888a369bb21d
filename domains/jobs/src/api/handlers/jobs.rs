//! Job listing API handlers

use axum::extract::State;
use chrono::NaiveDate;
use jobboard_common::{
    ApiResponse, ApiResult, JsonBody, Pagination, ResultExt, ValidatedPath, ValidatedQuery,
};
use serde::Deserialize;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Job, JobChanges, JobWithClient, JobWithEnrollments, NewJob};

/// Query parameters for listing jobs
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    pub keyword: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListJobsQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Request for creating a job listing.
///
/// Field rules are enforced by the repository, after the date range check.
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    pub help_needed: bool,

    pub language: Option<String>,
    pub residency: Option<String>,
    pub other: Option<String>,
    pub min_participants: Option<i32>,
    pub hours_per_day: Option<i32>,

    /// Client publishing the listing
    pub client_id: i64,

    pub stars: Option<i32>,
}

impl From<CreateJobRequest> for NewJob {
    fn from(req: CreateJobRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            help_needed: req.help_needed,
            language: req.language,
            residency: req.residency,
            other: req.other,
            min_participants: req.min_participants,
            hours_per_day: req.hours_per_day,
            client_id: req.client_id,
            stars: req.stars,
        }
    }
}

/// Request for updating a job listing.
///
/// `client_id` identifies the caller and must match the listing's owner.
/// It is never written back.
#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub client_id: i64,

    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub help_needed: Option<bool>,
    pub language: Option<String>,
    pub residency: Option<String>,
    pub other: Option<String>,
    pub min_participants: Option<i32>,
    pub hours_per_day: Option<i32>,
    pub stars: Option<i32>,
}

impl UpdateJobRequest {
    /// Split into the owner claim and the whitelisted changes
    pub fn into_parts(self) -> (i64, JobChanges) {
        let changes = JobChanges {
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            help_needed: self.help_needed,
            language: self.language,
            residency: self.residency,
            other: self.other,
            min_participants: self.min_participants,
            hours_per_day: self.hours_per_day,
            stars: self.stars,
        };
        (self.client_id, changes)
    }
}

/// List job listings, optionally filtered by a title keyword
pub async fn list_jobs(
    State(state): State<JobsState>,
    ValidatedQuery(query): ValidatedQuery<ListJobsQuery>,
) -> ApiResult<Vec<JobWithClient>> {
    let jobs = state
        .repos
        .jobs
        .list(query.keyword.as_deref(), query.pagination())
        .await
        .or_fail("Could not retrieve the job listings")?;

    Ok(ApiResponse::ok(jobs, "Job listings found"))
}

/// Get a single job listing by ID
pub async fn get_job(
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> ApiResult<JobWithClient> {
    let job = state
        .repos
        .jobs
        .get_by_id(id)
        .await
        .or_fail("Could not retrieve the job listing")?;

    Ok(ApiResponse::ok(job, "Job listing found"))
}

/// Create a job listing
pub async fn create_job(
    State(state): State<JobsState>,
    JsonBody(req): JsonBody<CreateJobRequest>,
) -> ApiResult<Job> {
    let job = state
        .repos
        .jobs
        .create(req.into())
        .await
        .or_fail("The job listing could not be created")?;

    Ok(ApiResponse::ok(job, "Job listing created"))
}

/// Update a job listing on behalf of its owner
pub async fn update_job(
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i64>,
    JsonBody(req): JsonBody<UpdateJobRequest>,
) -> ApiResult<Job> {
    let (owner_claim, changes) = req.into_parts();
    let job = state
        .repos
        .jobs
        .update(id, owner_claim, changes)
        .await
        .or_fail("The job listing could not be updated")?;

    Ok(ApiResponse::ok(job, "Job listing updated"))
}

/// Delete a job listing
pub async fn delete_job(
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> ApiResult<Job> {
    let job = state
        .repos
        .jobs
        .delete(id)
        .await
        .or_fail("The job listing could not be deleted")?;

    Ok(ApiResponse::ok(job, "Job listing deleted"))
}

/// Job listings created by a client, with their enrollments
pub async fn list_jobs_by_owner(
    State(state): State<JobsState>,
    ValidatedPath(owner_id): ValidatedPath<i64>,
) -> ApiResult<Vec<JobWithEnrollments>> {
    let jobs = state
        .repos
        .jobs
        .list_by_owner(owner_id)
        .await
        .or_fail("Could not retrieve the created job listings")?;

    Ok(ApiResponse::ok(jobs, "Created job listings retrieved"))
}
