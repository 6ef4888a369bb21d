//! Store traits for the Jobs domain
//!
//! Each method is a single store round-trip. Business rules (ownership,
//! date validation, not-found handling) live in the repositories built on
//! top of these traits.

use async_trait::async_trait;
use jobboard_common::Result;

use crate::domain::entities::{
    EnrollmentDetail, EnrollmentWithJob, Job, JobChanges, JobWithClient, JobWithEnrollments,
    NewJob,
};

/// Filter for a page of job listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListJobsFilter {
    /// Case-sensitive substring the title must contain
    pub keyword: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Persistence of jobs
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch a bare job row
    async fn find_job(&self, id: i64) -> Result<Option<Job>>;

    /// Fetch a job joined with its owning client
    async fn find_job_with_client(&self, id: i64) -> Result<Option<JobWithClient>>;

    /// Page through jobs ordered by id, joined with their owning client
    async fn list_jobs(&self, filter: &ListJobsFilter) -> Result<Vec<JobWithClient>>;

    /// Insert a job, returning it with its generated id
    async fn insert_job(&self, job: &NewJob) -> Result<Job>;

    /// Apply a partial update; `None` when the row no longer exists
    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<Job>>;

    /// Delete a job and its enrollments; false when nothing was deleted
    async fn delete_job(&self, id: i64) -> Result<bool>;

    /// All jobs owned by a client, each with its enrollment rows
    async fn list_jobs_by_owner(&self, client_id: i64) -> Result<Vec<JobWithEnrollments>>;
}

/// Persistence of enrollments
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Insert the enrollment unless the pair is already enrolled.
    /// Returns whether a new row was written.
    async fn insert_enrollment(&self, client_id: i64, job_id: i64) -> Result<bool>;

    /// Fetch an enrollment joined with its client and job
    async fn find_enrollment_detail(
        &self,
        client_id: i64,
        job_id: i64,
    ) -> Result<Option<EnrollmentDetail>>;

    /// All enrollments of a client, each joined with its job
    async fn list_enrollments_for_client(&self, client_id: i64) -> Result<Vec<EnrollmentWithJob>>;

    /// Number of enrollment rows for a (client, job) pair
    async fn count_enrollments(&self, client_id: i64, job_id: i64) -> Result<i64>;
}
