mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{create, memory_server, names, student_body};

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_student_success() {
    let server = memory_server();

    let response = server
        .post("/v1/students")
        .json(&student_body("  Ann  ", "Ann@Example.COM", "Oslo"))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["email"], "ann@example.com");
    assert_eq!(json["gender"], "FEMALE");
    assert!(json["id"].as_str().is_some());
    assert!(json.get("createdAt").is_some());
    assert!(json.get("updatedAt").is_some());
}

#[tokio::test]
async fn test_create_student_duplicate_email_any_case() {
    let server = memory_server();
    create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;

    let response = server
        .post("/v1/students")
        .json(&student_body("Other Ann", "ANN@X.COM", "Bergen"))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(json["error"]["message"], "Email already taken");
}

#[tokio::test]
async fn test_create_student_reports_every_problem() {
    let server = memory_server();

    let response = server
        .post("/v1/students")
        .json(&json!({ "name": "Ann", "email": 5, "role": "admin" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    let fields: Vec<&str> = json["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["address", "city", "email", "gender", "role"]);
}

#[tokio::test]
async fn test_create_student_rejects_bad_values() {
    let server = memory_server();

    let mut body = student_body("Ann", "not-an-email", "Oslo");
    body["gender"] = json!("female");

    let response = server.post("/v1/students").json(&body).await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["message"],
        "\"email\" must be a valid email, \"gender\" must be one of [MALE, FEMALE, OTHER]"
    );
}

#[tokio::test]
async fn test_create_student_reports_rule_errors_next_to_type_errors() {
    let server = memory_server();

    let response = server
        .post("/v1/students")
        .json(&json!({ "name": 42, "email": "nope", "gender": "male", "city": "C", "address": "D" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    let codes: Vec<(&str, &str)> = json["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["field"].as_str().unwrap(), f["code"].as_str().unwrap()))
        .collect();
    assert_eq!(codes, vec![("email", "email"), ("gender", "enum"), ("name", "type")]);
}

#[tokio::test]
async fn test_create_student_malformed_json() {
    let server = memory_server();

    let response = server
        .post("/v1/students")
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_student() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/v1/students/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn test_get_student_invalid_id() {
    let server = memory_server();

    let response = server.get("/v1/students/5ebac534954b54139806c112").await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["message"], "\"studentId\" must be a valid id");
    assert_eq!(json["error"]["details"]["fields"][0]["location"], "params");
}

#[tokio::test]
async fn test_get_student_not_found() {
    let server = memory_server();

    let response = server
        .get("/v1/students/67e55044-10b1-426f-9247-bb680e5fe0c8")
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["message"], "Student not found");
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_student() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/v1/students/{id}"))
        .json(&json!({ "city": "Bergen", "phone": "+47 555 0100" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["id"], created["id"]);
    assert_eq!(json["city"], "Bergen");
    assert_eq!(json["phone"], "+47 555 0100");
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_student_keeps_own_email() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/v1/students/{id}"))
        .json(&json!({ "email": "ANN@x.com" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_update_student_email_taken() {
    let server = memory_server();
    create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let bob = create(&server, "/v1/students", student_body("Bob", "bob@x.com", "Oslo")).await;
    let id = bob["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/v1/students/{id}"))
        .json(&json!({ "email": "ann@x.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_update_student_empty_body() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/v1/students/{id}"))
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "\"body\" must provide at least one field"
    );
}

#[tokio::test]
async fn test_update_student_reports_path_and_body_errors() {
    let server = memory_server();

    let response = server
        .patch("/v1/students/not-an-id")
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["message"],
        "\"studentId\" must be a valid id, \"body\" must provide at least one field"
    );
    assert_eq!(json["error"]["details"]["fields"][0]["location"], "params");
    assert_eq!(json["error"]["details"]["fields"][1]["location"], "body");
}

#[tokio::test]
async fn test_update_student_not_found() {
    let server = memory_server();

    let response = server
        .patch("/v1/students/67e55044-10b1-426f-9247-bb680e5fe0c8")
        .json(&json!({ "name": "Nobody" }))
        .await;

    response.assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_student() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
    let path = format!("/v1/students/{}", created["id"].as_str().unwrap());

    let response = server.delete(&path).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    server.get(&path).await.assert_status_not_found();
    server.delete(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_email_can_be_reused() {
    let server = memory_server();
    let created = create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;

    server
        .delete(&format!("/v1/students/{}", created["id"].as_str().unwrap()))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    create(&server, "/v1/students", student_body("Ann", "ann@x.com", "Oslo")).await;
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_students_filter_and_wildcard() {
    let server = memory_server();
    for (name, email, city) in [
        ("Anna", "anna@x.com", "Oslo"),
        ("Hanne", "hanne@x.com", "Oslo"),
        ("Bob", "bob@x.com", "Oslo"),
        ("Annika", "annika@x.com", "Bergen"),
    ] {
        create(&server, "/v1/students", student_body(name, email, city)).await;
    }

    let response = server
        .get("/v1/students")
        .add_query_param("city", "Oslo")
        .add_query_param("name", "*ANN*")
        .add_query_param("sortBy", "name:desc")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(names(&json), vec!["Hanne", "Anna"]);
    assert_eq!(json["totalResults"], 2);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["page"], 1);
    assert_eq!(json["limit"], 10);
}

#[tokio::test]
async fn test_list_students_exact_match_is_case_sensitive() {
    let server = memory_server();
    create(&server, "/v1/students", student_body("Anna", "anna@x.com", "Oslo")).await;

    let json = server
        .get("/v1/students")
        .add_query_param("city", "oslo")
        .await
        .json::<Value>();

    assert_eq!(json["totalResults"], 0);
    assert_eq!(json["totalPages"], 0);
    assert_eq!(json["results"], json!([]));
}

#[tokio::test]
async fn test_list_students_unknown_query_key() {
    let server = memory_server();

    let response = server
        .get("/v1/students")
        .add_query_param("department", "CS")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["message"], "\"department\" is not allowed");
    assert_eq!(json["error"]["details"]["fields"][0]["location"], "query");
}

#[tokio::test]
async fn test_list_students_rejects_empty_filter() {
    let server = memory_server();
    create(&server, "/v1/students", student_body("Anna", "anna@x.com", "Oslo")).await;

    let response = server.get("/v1/students").add_query_param("name", "").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "\"name\" is not allowed to be empty"
    );
}

#[tokio::test]
async fn test_list_students_by_id() {
    let server = memory_server();
    let anna = create(&server, "/v1/students", student_body("Anna", "anna@x.com", "Oslo")).await;
    create(&server, "/v1/students", student_body("Bob", "bob@x.com", "Oslo")).await;

    let json = server
        .get("/v1/students")
        .add_query_param("studentId", anna["id"].as_str().unwrap())
        .await
        .json::<Value>();

    assert_eq!(names(&json), vec!["Anna"]);
    assert_eq!(json["totalResults"], 1);
}

#[tokio::test]
async fn test_list_students_sorts_text_by_byte_order() {
    let server = memory_server();
    create(&server, "/v1/students", student_body("alice", "alice@x.com", "Oslo")).await;
    create(&server, "/v1/students", student_body("Bob", "bob@x.com", "Oslo")).await;

    let json = server
        .get("/v1/students")
        .add_query_param("sortBy", "name:asc")
        .await
        .json::<Value>();

    assert_eq!(names(&json), vec!["Bob", "alice"]);
}
