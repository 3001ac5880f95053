use school_registry::domain::entities::{CourseField, CoursePatch, NewCourse};
use school_registry::domain::query::{Filter, PageRequest};
use school_registry::domain::repositories::CourseRepository;
use school_registry::infrastructure::persistence::PgCourseRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_course(name: &str, department: &str, faculty: &str) -> NewCourse {
    NewCourse {
        name: name.to_string(),
        department: department.to_string(),
        faculty: faculty.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_course_crud(pool: PgPool) {
    let repo = PgCourseRepository::new(Arc::new(pool));

    let course = repo
        .create(new_course("Algebra", "Math", "Science"))
        .await
        .unwrap();
    assert_eq!(repo.find_by_id(course.id).await.unwrap(), Some(course.clone()));

    let updated = repo
        .update(
            course.id,
            CoursePatch {
                faculty: Some("Natural Sciences".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.faculty, "Natural Sciences");

    repo.delete(course.id).await.unwrap();
    assert!(repo.find_by_id(course.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_course_paginate_default_sort(pool: PgPool) {
    let repo = PgCourseRepository::new(Arc::new(pool));
    for name in ["Databases", "Algebra", "Compilers"] {
        repo.create(new_course(name, "CS", "Engineering"))
            .await
            .unwrap();
    }

    let page = repo
        .paginate(
            Filter::new().with(CourseField::Faculty, Some("engineering".to_string())),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total_results, 0);

    let page = repo
        .paginate(Filter::new(), PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = page.results.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Databases", "Algebra", "Compilers"]);
}
