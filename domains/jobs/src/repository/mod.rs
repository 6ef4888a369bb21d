//! Repository implementations for the Jobs domain

pub mod enrollments;
pub mod jobs;
pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use sqlx::PgPool;

pub use enrollments::EnrollmentService;
pub use jobs::JobRepository;
pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use store::{EnrollmentStore, JobStore, ListJobsFilter};

/// Combined repository access for the Jobs domain
#[derive(Clone)]
pub struct JobsRepositories {
    pub jobs: JobRepository,
    pub enrollments: EnrollmentService,
}

impl JobsRepositories {
    /// Repositories backed by PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    /// Repositories backed by process memory
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self::from_store(Arc::new(store))
    }

    /// Repositories sharing a single store implementing both traits
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: JobStore + EnrollmentStore + 'static,
    {
        Self {
            jobs: JobRepository::new(store.clone()),
            enrollments: EnrollmentService::new(store),
        }
    }
}
