//! Enrollment service

use std::sync::Arc;

use jobboard_common::{Error, Result};

use super::store::EnrollmentStore;
use crate::domain::entities::{EnrollmentDetail, Job};

#[derive(Clone)]
pub struct EnrollmentService {
    store: Arc<dyn EnrollmentStore>,
}

impl EnrollmentService {
    pub fn new(store: Arc<dyn EnrollmentStore>) -> Self {
        Self { store }
    }

    /// Ensure `client_id` is enrolled in `job_id` and return the joined record.
    ///
    /// Enrolling twice leaves a single row and returns the existing enrollment.
    pub async fn enroll(&self, client_id: i64, job_id: i64) -> Result<EnrollmentDetail> {
        let inserted = self.store.insert_enrollment(client_id, job_id).await?;
        if inserted {
            tracing::info!(client_id, job_id, "Client enrolled in job");
        } else {
            tracing::debug!(client_id, job_id, "Client already enrolled in job");
        }

        self.store
            .find_enrollment_detail(client_id, job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Enrollment not found".to_string()))
    }

    /// Jobs the client is enrolled in
    pub async fn list_jobs_for_client(&self, client_id: i64) -> Result<Vec<Job>> {
        let enrollments = self.store.list_enrollments_for_client(client_id).await?;
        Ok(enrollments.into_iter().map(|e| e.into_job()).collect())
    }

    /// Number of enrollment rows stored for a (client, job) pair
    pub async fn enrollment_count(&self, client_id: i64, job_id: i64) -> Result<i64> {
        self.store.count_enrollments(client_id, job_id).await
    }
}
