//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for the API tests:
//! - An application wired to a fresh in-memory store
//! - Client and job fixtures
//! - Request builders and response parsing

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use jobboard_app::create_app;
use jobboard_jobs::{Client, InMemoryStore, JobsRepositories};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test application backed by process memory
pub struct TestApp {
    pub store: InMemoryStore,
}

impl TestApp {
    /// Create a new test application with an empty store
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }

    /// Create a test application with clients 1..=count already registered
    pub async fn with_clients(count: i64) -> Self {
        let app = Self::new();
        for id in 1..=count {
            app.create_client(id).await;
        }
        app
    }

    /// Register a client fixture
    pub async fn create_client(&self, id: i64) -> Client {
        let client = ClientFixture::new(id).client;
        self.store.insert_client(client.clone()).await;
        client
    }

    /// Build a router sharing this application's store
    pub fn test_router(&self) -> Router {
        create_app(JobsRepositories::in_memory(self.store.clone()))
    }

    /// Send a single request through a fresh router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.test_router().oneshot(request).await.unwrap()
    }

    /// Create a job listing over HTTP and return its id
    pub async fn create_job(&self, client_id: i64, title: &str) -> i64 {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/trabajos",
                job_payload(client_id, title),
            ))
            .await;
        let body = parse_body(response).await;
        assert_eq!(body["ok"], true, "job fixture creation failed: {body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Enroll a client over HTTP
    pub async fn enroll(&self, job_id: i64, client_id: i64) -> Response {
        self.send(empty_request(
            Method::POST,
            &format!("/api/trabajos/{job_id}/inscripciones/{client_id}"),
        ))
        .await
    }
}

/// Client fixture
pub struct ClientFixture {
    pub client: Client,
}

impl ClientFixture {
    pub fn new(id: i64) -> Self {
        Self {
            client: Client {
                id,
                email: format!("client{id}@jobboard.test"),
                name: format!("Client {id}"),
                surnames: Some("Tester".to_string()),
                phone: None,
                photo: None,
                country: Some("Spain".to_string()),
                city: Some("Valencia".to_string()),
                language: Some("es".to_string()),
                description: None,
            },
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Valid job creation payload
pub fn job_payload(client_id: i64, title: &str) -> Value {
    json!({
        "title": title,
        "description": "Help around the farm",
        "start_date": "2026-06-01",
        "end_date": "2026-06-30",
        "help_needed": true,
        "language": "es",
        "residency": "Shared house",
        "min_participants": 2,
        "hours_per_day": 5,
        "client_id": client_id,
        "stars": 4
    })
}

/// Request with a JSON body
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Request without a body
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse a response body as JSON
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Common assertions
pub mod assertions {
    use serde_json::Value;

    /// Successful envelope: `ok` is true and `error` is absent
    pub fn assert_success(body: &Value, msg: &str) {
        assert_eq!(body["ok"], true, "unexpected failure: {body}");
        assert_eq!(body["msg"], msg);
        assert!(body.get("error").is_none());
    }

    /// Failed envelope carrying the failure text in `error`
    pub fn assert_failure(body: &Value, msg: &str) {
        assert_eq!(body["ok"], false, "unexpected success: {body}");
        assert_eq!(body["msg"], msg);
        assert!(body.get("data").is_none());
        assert!(body["error"].is_string());
    }

    /// Failed envelope without an `error` field (not found, unauthorized)
    pub fn assert_rejected(body: &Value, msg: &str) {
        assert_eq!(body["ok"], false, "unexpected success: {body}");
        assert_eq!(body["msg"], msg);
        assert!(body.get("data").is_none());
        assert!(body.get("error").is_none());
    }
}
