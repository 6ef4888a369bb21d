//! API endpoint integration tests
//!
//! Drives the composed router end to end against the in-memory store.

#![allow(dead_code)]

mod common;
mod enrollments;
mod jobs;
