//! HTTP handlers for the Jobs domain

pub mod enrollments;
pub mod jobs;
