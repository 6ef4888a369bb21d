//! Jobs domain: job listings, client read model, enrollments

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    EnrollmentService, EnrollmentStore, InMemoryStore, JobRepository, JobStore, JobsRepositories,
    ListJobsFilter, PgStore,
};

// Re-export API types
pub use api::routes;
pub use api::JobsState;
