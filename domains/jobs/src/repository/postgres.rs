//! PostgreSQL store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobboard_common::Result;
use sqlx::PgPool;

use super::store::{EnrollmentStore, JobStore, ListJobsFilter};
use crate::domain::entities::{
    Client, Enrollment, EnrollmentDetail, EnrollmentStatus, EnrollmentWithJob, Job, JobChanges,
    JobWithClient, JobWithEnrollments, NewJob,
};

/// Job columns, unqualified (single-table statements and RETURNING)
const JOB_FIELDS: &str = "id, title, description, start_date, end_date, help_needed, language, \
     residency, other, min_participants, hours_per_day, client_id, stars, created_at, updated_at";

/// Job columns qualified with the `j` alias
const JOB_COLUMNS: &str = "j.id, j.title, j.description, j.start_date, j.end_date, j.help_needed, \
     j.language, j.residency, j.other, j.min_participants, j.hours_per_day, j.client_id, j.stars, \
     j.created_at, j.updated_at";

/// Client columns under the `c` alias, prefixed to avoid clashing with job columns
const CLIENT_COLUMNS: &str = "c.id AS c_id, c.email AS c_email, c.name AS c_name, \
     c.surnames AS c_surnames, c.phone AS c_phone, c.photo AS c_photo, c.country AS c_country, \
     c.city AS c_city, c.language AS c_language, c.description AS c_description";

/// Enrollment columns under the `e` alias
const ENROLLMENT_COLUMNS: &str = "e.client_id AS e_client_id, e.job_id AS e_job_id, \
     e.status AS e_status, e.created_at AS e_created_at";

#[derive(sqlx::FromRow)]
struct ClientColumns {
    #[sqlx(rename = "c_id")]
    id: i64,
    #[sqlx(rename = "c_email")]
    email: String,
    #[sqlx(rename = "c_name")]
    name: String,
    #[sqlx(rename = "c_surnames")]
    surnames: Option<String>,
    #[sqlx(rename = "c_phone")]
    phone: Option<String>,
    #[sqlx(rename = "c_photo")]
    photo: Option<String>,
    #[sqlx(rename = "c_country")]
    country: Option<String>,
    #[sqlx(rename = "c_city")]
    city: Option<String>,
    #[sqlx(rename = "c_language")]
    language: Option<String>,
    #[sqlx(rename = "c_description")]
    description: Option<String>,
}

impl From<ClientColumns> for Client {
    fn from(c: ClientColumns) -> Self {
        Self {
            id: c.id,
            email: c.email,
            name: c.name,
            surnames: c.surnames,
            phone: c.phone,
            photo: c.photo,
            country: c.country,
            city: c.city,
            language: c.language,
            description: c.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentColumns {
    #[sqlx(rename = "e_client_id")]
    client_id: i64,
    #[sqlx(rename = "e_job_id")]
    job_id: i64,
    #[sqlx(rename = "e_status")]
    status: EnrollmentStatus,
    #[sqlx(rename = "e_created_at")]
    created_at: DateTime<Utc>,
}

impl From<EnrollmentColumns> for Enrollment {
    fn from(e: EnrollmentColumns) -> Self {
        Self {
            client_id: e.client_id,
            job_id: e.job_id,
            status: e.status,
            created_at: e.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct JobClientRow {
    #[sqlx(flatten)]
    job: Job,
    #[sqlx(flatten)]
    client: ClientColumns,
}

impl From<JobClientRow> for JobWithClient {
    fn from(row: JobClientRow) -> Self {
        Self {
            job: row.job,
            client: row.client.into(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentJobRow {
    #[sqlx(flatten)]
    enrollment: EnrollmentColumns,
    #[sqlx(flatten)]
    job: Job,
}

#[derive(sqlx::FromRow)]
struct EnrollmentDetailRow {
    #[sqlx(flatten)]
    enrollment: EnrollmentColumns,
    #[sqlx(flatten)]
    client: ClientColumns,
    #[sqlx(flatten)]
    job: Job,
}

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_FIELDS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn find_job_with_client(&self, id: i64) -> Result<Option<JobWithClient>> {
        let row = sqlx::query_as::<_, JobClientRow>(&format!(
            r#"
            SELECT {}, {}
            FROM jobs j
            JOIN clients c ON c.id = j.client_id
            WHERE j.id = $1
            "#,
            JOB_COLUMNS, CLIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_jobs(&self, filter: &ListJobsFilter) -> Result<Vec<JobWithClient>> {
        // strpos keeps the match a literal, case-sensitive substring
        let rows = sqlx::query_as::<_, JobClientRow>(&format!(
            r#"
            SELECT {}, {}
            FROM jobs j
            JOIN clients c ON c.id = j.client_id
            WHERE ($1::text IS NULL OR strpos(j.title, $1) > 0)
            ORDER BY j.id
            LIMIT $2 OFFSET $3
            "#,
            JOB_COLUMNS, CLIENT_COLUMNS
        ))
        .bind(filter.keyword.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_job(&self, job: &NewJob) -> Result<Job> {
        let created = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (title, description, start_date, end_date, help_needed, language,
                              residency, other, min_participants, hours_per_day, client_id, stars)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            JOB_FIELDS
        ))
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.start_date)
        .bind(job.end_date)
        .bind(job.help_needed)
        .bind(&job.language)
        .bind(&job.residency)
        .bind(&job.other)
        .bind(job.min_participants)
        .bind(job.hours_per_day)
        .bind(job.client_id)
        .bind(job.stars)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<Job>> {
        let updated = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                help_needed = COALESCE($6, help_needed),
                language = COALESCE($7, language),
                residency = COALESCE($8, residency),
                other = COALESCE($9, other),
                min_participants = COALESCE($10, min_participants),
                hours_per_day = COALESCE($11, hours_per_day),
                stars = COALESCE($12, stars),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_FIELDS
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.help_needed)
        .bind(&changes.language)
        .bind(&changes.residency)
        .bind(&changes.other)
        .bind(changes.min_participants)
        .bind(changes.hours_per_day)
        .bind(changes.stars)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        // Enrollments go with the job (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_jobs_by_owner(&self, client_id: i64) -> Result<Vec<JobWithEnrollments>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE client_id = $1 ORDER BY id",
            JOB_FIELDS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let job_ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT client_id, job_id, status, created_at
            FROM enrollments
            WHERE job_id = ANY($1)
            ORDER BY created_at, client_id
            "#,
        )
        .bind(job_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut by_job: HashMap<i64, Vec<Enrollment>> = HashMap::new();
        for enrollment in enrollments {
            by_job.entry(enrollment.job_id).or_default().push(enrollment);
        }

        Ok(jobs
            .into_iter()
            .map(|job| JobWithEnrollments {
                enrollments: by_job.remove(&job.id).unwrap_or_default(),
                job,
            })
            .collect())
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    async fn insert_enrollment(&self, client_id: i64, job_id: i64) -> Result<bool> {
        let enrollment = Enrollment::new(client_id, job_id);
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (client_id, job_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (client_id, job_id) DO NOTHING
            "#,
        )
        .bind(enrollment.client_id)
        .bind(enrollment.job_id)
        .bind(enrollment.status)
        .bind(enrollment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_enrollment_detail(
        &self,
        client_id: i64,
        job_id: i64,
    ) -> Result<Option<EnrollmentDetail>> {
        let row = sqlx::query_as::<_, EnrollmentDetailRow>(&format!(
            r#"
            SELECT {}, {}, {}
            FROM enrollments e
            JOIN clients c ON c.id = e.client_id
            JOIN jobs j ON j.id = e.job_id
            WHERE e.client_id = $1 AND e.job_id = $2
            "#,
            ENROLLMENT_COLUMNS, CLIENT_COLUMNS, JOB_COLUMNS
        ))
        .bind(client_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| EnrollmentDetail {
            enrollment: r.enrollment.into(),
            client: r.client.into(),
            job: r.job,
        }))
    }

    async fn list_enrollments_for_client(&self, client_id: i64) -> Result<Vec<EnrollmentWithJob>> {
        let rows = sqlx::query_as::<_, EnrollmentJobRow>(&format!(
            r#"
            SELECT {}, {}
            FROM enrollments e
            JOIN jobs j ON j.id = e.job_id
            WHERE e.client_id = $1
            ORDER BY e.created_at, j.id
            "#,
            ENROLLMENT_COLUMNS, JOB_COLUMNS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| EnrollmentWithJob {
                enrollment: r.enrollment.into(),
                job: r.job,
            })
            .collect())
    }

    async fn count_enrollments(&self, client_id: i64, job_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE client_id = $1 AND job_id = $2",
        )
        .bind(client_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
