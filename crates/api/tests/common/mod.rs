//! Common test utilities for integration tests.
//!
//! Every test runs against a fresh in-memory store loaded with the demo
//! dataset, so tests are independent and need no database.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use domain::models::Role;
use edu_platform_api::{
    app::{create_app, Stores},
    config::Config,
    extractors::{SESSION_ROLE_HEADER, SESSION_USER_HEADER},
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

pub use persistence::seed::user_id;

/// Seeded user numbers.
pub const ADMIN: u128 = 1;
pub const TEACHER: u128 = 2;
pub const STUDENT_BUDI: u128 = 5;
pub const STUDENT_SITI: u128 = 6;

/// Test configuration built from embedded defaults.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// Create a test application router over a freshly seeded memory store.
pub async fn create_test_app() -> Router {
    let stores = Stores::memory();
    stores.seed_demo().await.expect("Failed to seed demo data");
    create_app(test_config(), stores)
}

/// Create a test application router with no records at all.
pub fn create_empty_app() -> Router {
    create_app(test_config(), Stores::memory())
}

/// Who a request is sent as.
#[derive(Debug, Clone, Copy)]
pub enum As {
    /// No session headers; the gateway default applies.
    Anonymous,
    User(u128, Role),
}

impl As {
    pub fn admin() -> Self {
        As::User(ADMIN, Role::Admin)
    }

    pub fn teacher() -> Self {
        As::User(TEACHER, Role::Teacher)
    }

    pub fn student(n: u128) -> Self {
        As::User(n, Role::Student)
    }
}

fn builder(method: Method, uri: &str, who: As) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match who {
        As::Anonymous => builder,
        As::User(n, role) => builder
            .header(SESSION_USER_HEADER, user_id(n).to_string())
            .header(SESSION_ROLE_HEADER, role.as_str()),
    }
}

/// Build a GET request sent as `who`.
pub fn get_request(uri: &str, who: As) -> Request<Body> {
    builder(Method::GET, uri, who)
        .body(Body::empty())
        .unwrap()
}

/// Build a DELETE request sent as `who`.
pub fn delete_request(uri: &str, who: As) -> Request<Body> {
    builder(Method::DELETE, uri, who)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON request sent as `who`.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value, who: As) -> Request<Body> {
    builder(method, uri, who)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Detail id of a JSON record body.
pub fn id_of(body: &serde_json::Value) -> Uuid {
    body["id"].as_str().unwrap().parse().unwrap()
}

/// A valid user form with random name and email.
pub fn user_payload(role: &str) -> serde_json::Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "0812-3456-7890",
        "role": role,
    })
}

/// A valid course form.
pub fn course_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "Ownership, borrowing and async services",
        "category": "Programming",
        "level": "intermediate",
        "duration_weeks": 8,
        "price": 1_500_000.0,
        "capacity": 25,
        "status": "active",
        "modules": [
            {
                "title": "Ownership",
                "duration_minutes": 90,
                "lessons": ["Moves", "Borrowing"]
            },
            {
                "title": "Async",
                "duration_minutes": 120,
                "lessons": ["Futures", "Tokio", "Axum"]
            }
        ]
    })
}

/// A valid grade form for a seeded student.
pub fn grade_payload(student: u128, scores: &[f64]) -> serde_json::Value {
    let components: Vec<serde_json::Value> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| serde_json::json!({ "name": format!("Quiz {}", i + 1), "score": score }))
        .collect();
    serde_json::json!({
        "student_id": user_id(student),
        "student_name": "Budi Santoso",
        "subject": "Chemistry",
        "level": "Grade 10",
        "components": components,
    })
}
