//! Enrollment endpoint integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{
    assertions::{assert_failure, assert_success},
    empty_request, parse_body, TestApp,
};

mod test_enroll {
    use super::*;

    #[tokio::test]
    async fn test_enroll_returns_joined_record() {
        let app = TestApp::with_clients(2).await;
        let job_id = app.create_job(1, "Barista").await;

        let response = app.enroll(job_id, 2).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = parse_body(response).await;
        assert_success(&body, "Enrolled successfully");
        assert_eq!(body["data"]["client_id"], 2);
        assert_eq!(body["data"]["job_id"], job_id);
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["client"]["email"], "client2@jobboard.test");
        assert_eq!(body["data"]["job"]["title"], "Barista");
    }

    /// Enrolling twice succeeds and the job is listed once
    #[tokio::test]
    async fn test_enroll_twice_is_idempotent() {
        let app = TestApp::with_clients(2).await;
        let job_id = app.create_job(1, "Barista").await;

        let first = parse_body(app.enroll(job_id, 2).await).await;
        let response = app.enroll(job_id, 2).await;
        assert_eq!(response.status(), StatusCode::OK);
        let second = parse_body(response).await;

        assert_eq!(first["data"]["created_at"], second["data"]["created_at"]);

        let listed = parse_body(
            app.send(empty_request(Method::GET, "/api/clientes/2/inscripciones"))
                .await,
        )
        .await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_enroll_in_missing_job_is_500() {
        let app = TestApp::with_clients(1).await;

        let response = app.enroll(404, 1).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = parse_body(response).await;
        assert_failure(&body, "Could not enroll in the job listing");
    }

    #[tokio::test]
    async fn test_enroll_unknown_client_is_500() {
        let app = TestApp::with_clients(1).await;
        let job_id = app.create_job(1, "Barista").await;

        let response = app.enroll(job_id, 99).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = parse_body(response).await;
        assert_failure(&body, "Could not enroll in the job listing");
    }

    #[tokio::test]
    async fn test_enroll_store_failure_is_500() {
        let app = TestApp::with_clients(2).await;
        let job_id = app.create_job(1, "Barista").await;
        app.store.set_unavailable(true);

        let response = app.enroll(job_id, 2).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = parse_body(response).await;
        assert_failure(&body, "Could not enroll in the job listing");
        assert_eq!(body["error"], "store unavailable");
    }
}

mod test_list_enrolled_jobs {
    use super::*;

    #[tokio::test]
    async fn test_lists_jobs_not_enrollments() {
        let app = TestApp::with_clients(2).await;
        let first = app.create_job(1, "Barista").await;
        let second = app.create_job(1, "Gardener").await;
        app.enroll(first, 2).await;
        app.enroll(second, 2).await;

        let response = app
            .send(empty_request(Method::GET, "/api/clientes/2/inscripciones"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = parse_body(response).await;
        assert_success(&body, "Enrollments retrieved");
        let jobs = body["data"].as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|j| j.get("status").is_none()));

        let mut titles: Vec<&str> = jobs.iter().map(|j| j["title"].as_str().unwrap()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["Barista", "Gardener"]);
    }

    #[tokio::test]
    async fn test_client_without_enrollments_gets_empty_list() {
        let app = TestApp::with_clients(1).await;

        let response = app
            .send(empty_request(Method::GET, "/api/clientes/1/inscripciones"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = parse_body(response).await;
        assert_eq!(body["data"], json!([]));
    }
}
