#![allow(dead_code)]

use axum_test::TestServer;
use school_registry::domain::entities::{Gender, NewStudent, NewTeacher};
use school_registry::routes::router;
use school_registry::state::AppState;
use serde_json::{Value, json};

/// Test server over fresh in-memory stores.
pub fn memory_server() -> TestServer {
    TestServer::new(router(AppState::in_memory())).unwrap()
}

pub fn student_body(name: &str, email: &str, city: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "gender": "FEMALE",
        "city": city,
        "address": "1 Main Street"
    })
}

pub fn teacher_body(name: &str, email: &str, department: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "gender": "MALE",
        "department": department,
        "address": "Campus"
    })
}

pub fn course_body(name: &str, department: &str, faculty: &str) -> Value {
    json!({ "name": name, "department": department, "faculty": faculty })
}

/// POSTs `body` to `path`, asserts 201 and returns the created record.
pub async fn create(server: &TestServer, path: &str, body: Value) -> Value {
    let response = server.post(path).json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub fn new_student(name: &str, email: &str, city: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: email.to_string(),
        gender: Gender::Female,
        city: city.to_string(),
        address: "1 Main Street".to_string(),
        phone: None,
    }
}

pub fn new_teacher(name: &str, email: &str, department: &str) -> NewTeacher {
    NewTeacher {
        name: name.to_string(),
        email: email.to_string(),
        gender: Gender::Male,
        department: department.to_string(),
        address: "Campus".to_string(),
        phone: None,
    }
}

/// Names of the records in a page response, in order.
pub fn names(page: &Value) -> Vec<String> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}
