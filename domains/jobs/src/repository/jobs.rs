//! Job repository

use std::sync::Arc;

use jobboard_common::{Error, Pagination, Result};

use super::store::{JobStore, ListJobsFilter};
use crate::domain::entities::{Job, JobChanges, JobWithClient, JobWithEnrollments, NewJob};

#[derive(Clone)]
pub struct JobRepository {
    store: Arc<dyn JobStore>,
}

impl JobRepository {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// List a page of jobs with their owning client.
    ///
    /// An empty keyword is the same as no keyword. No total count is
    /// returned.
    pub async fn list(
        &self,
        keyword: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<JobWithClient>> {
        let filter = ListJobsFilter {
            keyword: keyword.filter(|k| !k.is_empty()).map(str::to_string),
            limit: pagination.limit(),
            offset: pagination.offset(),
        };
        tracing::debug!(
            keyword = ?filter.keyword,
            limit = filter.limit,
            offset = filter.offset,
            "Listing jobs"
        );
        self.store.list_jobs(&filter).await
    }

    /// Find a job with its owning client
    pub async fn get_by_id(&self, id: i64) -> Result<JobWithClient> {
        self.store
            .find_job_with_client(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    /// Create a job after checking its invariants
    pub async fn create(&self, job: NewJob) -> Result<Job> {
        job.validate()?;

        let created = self.store.insert_job(&job).await?;
        tracing::info!(job_id = created.id, client_id = created.client_id, "Job created");
        Ok(created)
    }

    /// Update a job on behalf of `owner_claim`.
    ///
    /// The claim is compared against the stored owner; the changes cannot
    /// reassign ownership.
    pub async fn update(&self, id: i64, owner_claim: i64, changes: JobChanges) -> Result<Job> {
        let job = self
            .store
            .find_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if job.client_id != owner_claim {
            tracing::warn!(
                job_id = id,
                owner_claim,
                "Rejected job update from non-owner"
            );
            return Err(Error::Unauthorized(
                "You are not allowed to edit this job".to_string(),
            ));
        }

        changes.validate_against(&job)?;
        if changes.is_empty() {
            return Ok(job);
        }

        let updated = self
            .store
            .update_job(id, &changes)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(job_id = id, "Job updated");
        Ok(updated)
    }

    /// Delete a job, returning the record as it was before deletion
    pub async fn delete(&self, id: i64) -> Result<Job> {
        let job = self
            .store
            .find_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if !self.store.delete_job(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = id, "Job deleted");
        Ok(job)
    }

    /// Jobs created by a client, with their enrollments
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<JobWithEnrollments>> {
        self.store.list_jobs_by_owner(owner_id).await
    }
}
