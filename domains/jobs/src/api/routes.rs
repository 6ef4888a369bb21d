//! Route definitions for Jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{enrollments, jobs};
use super::middleware::JobsState;

/// Create job listing routes
fn job_routes() -> Router<JobsState> {
    Router::new()
        .route("/api/trabajos", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/api/trabajos/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/api/clientes/{clienteid}/trabajos",
            get(jobs::list_jobs_by_owner),
        )
}

/// Create enrollment routes
fn enrollment_routes() -> Router<JobsState> {
    Router::new()
        .route(
            "/api/trabajos/{id}/inscripciones/{clienteid}",
            post(enrollments::enroll),
        )
        .route(
            "/api/clientes/{clienteid}/inscripciones",
            get(enrollments::list_enrolled_jobs),
        )
}

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .merge(job_routes())
        .merge(enrollment_routes())
}
