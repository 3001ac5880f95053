//! Course management service.

use crate::domain::entities::{Course, CourseField, CoursePatch, NewCourse};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for course records. Courses have no uniqueness rules.
pub struct CourseService<R: CourseRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CourseRepository + ?Sized> CourseService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_course(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let course = self.repository.create(new_course).await?;
        tracing::info!(id = %course.id, "Course created");
        Ok(course)
    }

    pub async fn query_courses(
        &self,
        filter: Filter<CourseField>,
        request: PageRequest<CourseField>,
    ) -> Result<Page<Course>, AppError> {
        self.repository.paginate(filter, request).await
    }

    pub async fn get_course_by_id(&self, id: Uuid) -> Result<Course, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found", json!({ "id": id })))
    }

    pub async fn update_course_by_id(
        &self,
        id: Uuid,
        patch: CoursePatch,
    ) -> Result<Course, AppError> {
        self.get_course_by_id(id).await?;
        let course = self.repository.update(id, patch).await?;
        tracing::info!(%id, "Course updated");
        Ok(course)
    }

    pub async fn delete_course_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.get_course_by_id(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(%id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCourseRepository;
    use chrono::Utc;

    fn new_course() -> NewCourse {
        NewCourse {
            name: "Algorithms".to_string(),
            department: "CS".to_string(),
            faculty: "Engineering".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_course_has_no_uniqueness_check() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo
            .expect_create()
            .times(2)
            .returning(|new| Ok(Course::create(new, Utc::now())));

        let service = CourseService::new(Arc::new(mock_repo));

        let first = service.create_course(new_course()).await.unwrap();
        let second = service.create_course(new_course()).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_missing_course() {
        let mut mock_repo = MockCourseRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = CourseService::new(Arc::new(mock_repo));

        let result = service
            .update_course_by_id(Uuid::new_v4(), CoursePatch::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_course() {
        let course = Course::create(new_course(), Utc::now());
        let id = course.id;

        let mut mock_repo = MockCourseRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(course.clone())));
        mock_repo
            .expect_delete()
            .withf(move |target| *target == id)
            .times(1)
            .returning(|_| Ok(()));

        let service = CourseService::new(Arc::new(mock_repo));

        assert!(service.delete_course_by_id(id).await.is_ok());
    }
}
