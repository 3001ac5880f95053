mod common;

use school_registry::domain::entities::{TeacherField, TeacherPatch};
use school_registry::domain::query::{Filter, PageRequest};
use school_registry::domain::repositories::TeacherRepository;
use school_registry::error::AppError;
use school_registry::infrastructure::persistence::PgTeacherRepository;
use sqlx::PgPool;
use std::sync::Arc;

use common::new_teacher;

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_paginate_department_by_name(pool: PgPool) {
    let repo = PgTeacherRepository::new(Arc::new(pool));
    for (name, department) in [
        ("Eve", "CS"),
        ("Bob", "CS"),
        ("Dan", "Math"),
        ("Alice", "CS"),
        ("Carol", "CS"),
        ("Frank", "CS"),
    ] {
        let email = format!("{}@uni.edu", name.to_lowercase());
        repo.create(new_teacher(name, &email, department))
            .await
            .unwrap();
    }

    let filter = Filter::new().with(TeacherField::Department, Some("CS".to_string()));
    let page = repo
        .paginate(filter, PageRequest::new(Some("name:asc"), Some(2), None))
        .await
        .unwrap();

    let names: Vec<_> = page.results.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(page.total_results, 5);
    assert_eq!(page.total_pages, 3);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_to_taken_email_conflicts(pool: PgPool) {
    let repo = PgTeacherRepository::new(Arc::new(pool));
    repo.create(new_teacher("Eve", "eve@uni.edu", "CS"))
        .await
        .unwrap();
    let bob = repo
        .create(new_teacher("Bob", "bob@uni.edu", "CS"))
        .await
        .unwrap();

    let result = repo
        .update(
            bob.id,
            TeacherPatch {
                email: Some("eve@uni.edu".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
