//! Domain entities for the Jobs domain
//!
//! Jobs are owned by the client that posted them. Clients are a read model
//! owned by another part of the system; this domain only joins against them.
//! Enrollments link a client to a job they signed up for.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use jobboard_common::{Error, Result};

/// Enrollment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Pending => write!(f, "pending"),
            EnrollmentStatus::Accepted => write!(f, "accepted"),
            EnrollmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Job listing entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub help_needed: bool,
    pub language: Option<String>,
    pub residency: Option<String>,
    pub other: Option<String>,
    pub min_participants: Option<i32>,
    pub hours_per_day: Option<i32>,
    pub client_id: i64,
    pub stars: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a job about to be created.
///
/// Field rules are checked by `validate`, after the date range.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewJob {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub help_needed: bool,

    #[validate(length(max = 50, message = "Language must be at most 50 characters"))]
    pub language: Option<String>,

    #[validate(length(max = 100, message = "Residency must be at most 100 characters"))]
    pub residency: Option<String>,

    #[validate(length(max = 2000, message = "Other must be at most 2000 characters"))]
    pub other: Option<String>,

    #[validate(range(min = 1, message = "Minimum participants must be at least 1"))]
    pub min_participants: Option<i32>,

    #[validate(range(min = 1, max = 24, message = "Hours per day must be between 1 and 24"))]
    pub hours_per_day: Option<i32>,

    pub client_id: i64,

    #[validate(range(min = 0, max = 5, message = "Stars must be between 0 and 5"))]
    pub stars: Option<i32>,
}

impl NewJob {
    /// Check the job invariants before anything is written.
    ///
    /// The date range is checked first, so its message wins when several
    /// rules fail.
    pub fn validate(&self) -> Result<()> {
        validate_date_range(self.start_date, self.end_date)?;
        Validate::validate(self).map_err(|errors| Error::Validation(first_message(&errors)))
    }

    /// Materialize the job with a store-assigned id
    pub fn into_job(self, id: i64, now: DateTime<Utc>) -> Job {
        Job {
            id,
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
            client_id: self.client_id,
            stars: self.stars,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Job> for NewJob {
    fn from(job: Job) -> Self {
        Self {
            title: job.title,
            description: job.description,
            start_date: job.start_date,
            end_date: job.end_date,
            help_needed: job.help_needed,
            language: job.language,
            residency: job.residency,
            other: job.other,
            min_participants: job.min_participants,
            hours_per_day: job.hours_per_day,
            client_id: job.client_id,
            stars: job.stars,
        }
    }
}

/// Mutable fields of a job.
///
/// The owning client is deliberately absent: ownership cannot be reassigned
/// through an update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobChanges {
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

impl JobChanges {
    /// True when the update would not touch any field
    #[mutants::skip] // Only short-circuits a store write that would change nothing
    pub fn is_empty(&self) -> bool {
        *self == JobChanges::default()
    }

    /// Merge the changes over `job`, returning the resulting record
    pub fn apply(&self, job: &Job) -> Job {
        let mut merged = job.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(description) = &self.description {
            merged.description = Some(description.clone());
        }
        if let Some(start_date) = self.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            merged.end_date = end_date;
        }
        if let Some(help_needed) = self.help_needed {
            merged.help_needed = help_needed;
        }
        if let Some(language) = &self.language {
            merged.language = Some(language.clone());
        }
        if let Some(residency) = &self.residency {
            merged.residency = Some(residency.clone());
        }
        if let Some(other) = &self.other {
            merged.other = Some(other.clone());
        }
        if let Some(min_participants) = self.min_participants {
            merged.min_participants = Some(min_participants);
        }
        if let Some(hours_per_day) = self.hours_per_day {
            merged.hours_per_day = Some(hours_per_day);
        }
        if let Some(stars) = self.stars {
            merged.stars = Some(stars);
        }
        merged
    }

    /// Validate the record that would result from applying these changes
    pub fn validate_against(&self, job: &Job) -> Result<()> {
        NewJob::from(self.apply(job)).validate()
    }
}

/// Client read model.
///
/// Credentials live on the same table but are never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surnames: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
}

/// Enrollment of a client in a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub client_id: i64,
    pub job_id: i64,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(client_id: i64, job_id: i64) -> Self {
        Self {
            client_id,
            job_id,
            status: EnrollmentStatus::default(),
            created_at: Utc::now(),
        }
    }
}

/// Job joined with its owning client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobWithClient {
    #[serde(flatten)]
    pub job: Job,
    pub client: Client,
}

/// Job joined with its enrollment rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobWithEnrollments {
    #[serde(flatten)]
    pub job: Job,
    pub enrollments: Vec<Enrollment>,
}

/// Enrollment joined with the enrolled client and the job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub client: Client,
    pub job: Job,
}

/// Enrollment joined with its job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentWithJob {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub job: Job,
}

impl EnrollmentWithJob {
    /// Drop the join metadata, keeping the job
    pub fn into_job(self) -> Job {
        self.job
    }
}

/// The availability window must end strictly after it starts
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start >= end {
        return Err(Error::Validation(
            "end date must be after start date".to_string(),
        ));
    }
    Ok(())
}

/// Message of the first failed field rule
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
