//! In-memory store
//!
//! Mirrors the PostgreSQL schema rules: generated job ids, foreign keys from
//! jobs and enrollments to clients, cascading job deletes and one enrollment
//! per (client, job) pair. Used by tests and by `JOBBOARD_STORE=memory`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jobboard_common::{Error, RepositoryError, Result};
use tokio::sync::RwLock;

use super::store::{EnrollmentStore, JobStore, ListJobsFilter};
use crate::domain::entities::{
    Client, Enrollment, EnrollmentDetail, EnrollmentWithJob, Job, JobChanges, JobWithClient,
    JobWithEnrollments, NewJob,
};

#[derive(Debug, Default)]
struct MemoryState {
    clients: BTreeMap<i64, Client>,
    jobs: BTreeMap<i64, Job>,
    enrollments: Vec<Enrollment>,
    last_job_id: i64,
}

impl MemoryState {
    fn client(&self, id: i64) -> Result<&Client> {
        self.clients.get(&id).ok_or_else(|| {
            RepositoryError::ForeignKey(format!("client {} does not exist", id)).into()
        })
    }

    fn with_client(&self, job: &Job) -> Result<JobWithClient> {
        Ok(JobWithClient {
            job: job.clone(),
            client: self.client(job.client_id)?.clone(),
        })
    }
}

/// Store keeping every table in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client (clients are written by another part of the system)
    pub async fn insert_client(&self, client: Client) {
        self.state.write().await.clients.insert(client.id, client);
    }

    /// Register clients `1..=count` with placeholder profiles
    pub async fn seed_demo_clients(&self, count: i64) {
        let mut state = self.state.write().await;
        for id in 1..=count {
            state.clients.insert(
                id,
                Client {
                    id,
                    email: format!("demo{}@jobboard.local", id),
                    name: format!("Demo client {}", id),
                    surnames: None,
                    phone: None,
                    photo: None,
                    country: None,
                    city: None,
                    language: None,
                    description: None,
                },
            );
        }
    }

    /// Make every store call fail, as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Store("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        self.check_available()?;
        Ok(self.state.read().await.jobs.get(&id).cloned())
    }

    async fn find_job_with_client(&self, id: i64) -> Result<Option<JobWithClient>> {
        self.check_available()?;
        let state = self.state.read().await;
        state
            .jobs
            .get(&id)
            .map(|job| state.with_client(job))
            .transpose()
    }

    async fn list_jobs(&self, filter: &ListJobsFilter) -> Result<Vec<JobWithClient>> {
        self.check_available()?;
        let state = self.state.read().await;
        let offset = usize::try_from(filter.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit.max(0)).unwrap_or(usize::MAX);

        state
            .jobs
            .values()
            .filter(|job| match &filter.keyword {
                Some(keyword) => job.title.contains(keyword.as_str()),
                None => true,
            })
            .skip(offset)
            .take(limit)
            .map(|job| state.with_client(job))
            .collect()
    }

    async fn insert_job(&self, job: &NewJob) -> Result<Job> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.client(job.client_id)?;

        state.last_job_id += 1;
        let created = job.clone().into_job(state.last_job_id, Utc::now());
        state.jobs.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<Job>> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.get_mut(&id) else {
            return Ok(None);
        };

        let mut updated = changes.apply(job);
        updated.updated_at = Utc::now();
        *job = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        state.enrollments.retain(|e| e.job_id != id);
        Ok(true)
    }

    async fn list_jobs_by_owner(&self, client_id: i64) -> Result<Vec<JobWithEnrollments>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .jobs
            .values()
            .filter(|job| job.client_id == client_id)
            .map(|job| JobWithEnrollments {
                job: job.clone(),
                enrollments: state
                    .enrollments
                    .iter()
                    .filter(|e| e.job_id == job.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryStore {
    async fn insert_enrollment(&self, client_id: i64, job_id: i64) -> Result<bool> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.client(client_id)?;
        if !state.jobs.contains_key(&job_id) {
            return Err(RepositoryError::ForeignKey(format!("job {} does not exist", job_id)).into());
        }

        let exists = state
            .enrollments
            .iter()
            .any(|e| e.client_id == client_id && e.job_id == job_id);
        if exists {
            return Ok(false);
        }

        state.enrollments.push(Enrollment::new(client_id, job_id));
        Ok(true)
    }

    async fn find_enrollment_detail(
        &self,
        client_id: i64,
        job_id: i64,
    ) -> Result<Option<EnrollmentDetail>> {
        self.check_available()?;
        let state = self.state.read().await;
        let Some(enrollment) = state
            .enrollments
            .iter()
            .find(|e| e.client_id == client_id && e.job_id == job_id)
        else {
            return Ok(None);
        };

        let (Some(client), Some(job)) = (state.clients.get(&client_id), state.jobs.get(&job_id))
        else {
            return Ok(None);
        };

        Ok(Some(EnrollmentDetail {
            enrollment: enrollment.clone(),
            client: client.clone(),
            job: job.clone(),
        }))
    }

    async fn list_enrollments_for_client(&self, client_id: i64) -> Result<Vec<EnrollmentWithJob>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .filter(|e| e.client_id == client_id)
            .filter_map(|e| {
                state.jobs.get(&e.job_id).map(|job| EnrollmentWithJob {
                    enrollment: e.clone(),
                    job: job.clone(),
                })
            })
            .collect())
    }

    async fn count_enrollments(&self, client_id: i64, job_id: i64) -> Result<i64> {
        self.check_available()?;
        let state = self.state.read().await;
        let count = state
            .enrollments
            .iter()
            .filter(|e| e.client_id == client_id && e.job_id == job_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
