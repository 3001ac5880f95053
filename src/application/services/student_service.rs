//! Student management service.

use crate::domain::entities::{NewStudent, Student, StudentField, StudentPatch};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::StudentRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for student records.
///
/// Enforces email uniqueness before writes. The check is a read followed by a
/// write, so two concurrent creates with the same email can both pass it; the
/// store's unique index then rejects the second insert with the same
/// [`AppError::Conflict`].
pub struct StudentService<R: StudentRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a student.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_student(&self, new_student: NewStudent) -> Result<Student, AppError> {
        if self
            .repository
            .is_email_taken(&new_student.email, None)
            .await?
        {
            tracing::debug!(email = %new_student.email, "Student email already taken");
            return Err(AppError::email_taken(&new_student.email));
        }

        let student = self.repository.create(new_student).await?;
        tracing::info!(id = %student.id, "Student created");
        Ok(student)
    }

    /// Returns one page of students matching `filter`.
    pub async fn query_students(
        &self,
        filter: Filter<StudentField>,
        request: PageRequest<StudentField>,
    ) -> Result<Page<Student>, AppError> {
        self.repository.paginate(filter, request).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student does not exist.
    pub async fn get_student_by_id(&self, id: Uuid) -> Result<Student, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found", json!({ "id": id })))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another student.
    pub async fn update_student_by_id(
        &self,
        id: Uuid,
        patch: StudentPatch,
    ) -> Result<Student, AppError> {
        self.get_student_by_id(id).await?;

        if let Some(email) = &patch.email
            && self.repository.is_email_taken(email, Some(id)).await?
        {
            tracing::debug!(%id, %email, "Student email already taken");
            return Err(AppError::email_taken(email));
        }

        let student = self.repository.update(id, patch).await?;
        tracing::info!(%id, "Student updated");
        Ok(student)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student does not exist.
    pub async fn delete_student_by_id(&self, id: Uuid) -> Result<(), AppError> {
        self.get_student_by_id(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(%id, "Student deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Gender;
    use crate::domain::repositories::MockStudentRepository;
    use chrono::Utc;

    fn new_student(email: &str) -> NewStudent {
        NewStudent {
            name: "A".to_string(),
            email: email.to_string(),
            gender: Gender::Male,
            city: "C".to_string(),
            address: "D".to_string(),
            phone: None,
        }
    }

    fn stored_student(email: &str) -> Student {
        Student::create(new_student(email), Utc::now())
    }

    #[tokio::test]
    async fn test_create_student_success() {
        let mut mock_repo = MockStudentRepository::new();

        mock_repo
            .expect_is_email_taken()
            .withf(|email, exclude| email == "a@x.com" && exclude.is_none())
            .times(1)
            .returning(|_, _| Ok(false));

        mock_repo
            .expect_create()
            .times(1)
            .returning(|new| Ok(Student::create(new, Utc::now())));

        let service = StudentService::new(Arc::new(mock_repo));

        let student = service.create_student(new_student("a@x.com")).await.unwrap();
        assert_eq!(student.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_create_student_email_taken() {
        let mut mock_repo = MockStudentRepository::new();

        mock_repo
            .expect_is_email_taken()
            .times(1)
            .returning(|_, _| Ok(true));
        mock_repo.expect_create().never();

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service.create_student(new_student("a@x.com")).await;

        match result {
            Err(AppError::Conflict { message, .. }) => assert_eq!(message, "Email already taken"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_student_unique_index_backstop() {
        let mut mock_repo = MockStudentRepository::new();

        mock_repo
            .expect_is_email_taken()
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_create()
            .returning(|new| Err(AppError::email_taken(&new.email)));

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service.create_student(new_student("a@x.com")).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_get_student_not_found() {
        let mut mock_repo = MockStudentRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service.get_student_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_student_checks_email_excluding_self() {
        let existing = stored_student("a@x.com");
        let id = existing.id;

        let mut mock_repo = MockStudentRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_is_email_taken()
            .withf(move |email, exclude| email == "b@x.com" && *exclude == Some(id))
            .times(1)
            .returning(|_, _| Ok(false));
        mock_repo.expect_update().times(1).returning(|id, patch| {
            let mut student = stored_student("a@x.com");
            student.id = id;
            student.apply(patch, Utc::now());
            Ok(student)
        });

        let service = StudentService::new(Arc::new(mock_repo));

        let updated = service
            .update_student_by_id(
                id,
                StudentPatch {
                    email: Some("b@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.email, "b@x.com");
    }

    #[tokio::test]
    async fn test_update_student_email_taken() {
        let existing = stored_student("a@x.com");
        let id = existing.id;

        let mut mock_repo = MockStudentRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_is_email_taken()
            .returning(|_, _| Ok(true));
        mock_repo.expect_update().never();

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service
            .update_student_by_id(
                id,
                StudentPatch {
                    email: Some("taken@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_without_email_skips_uniqueness_check() {
        let existing = stored_student("a@x.com");
        let id = existing.id;
        let returned = existing.clone();

        let mut mock_repo = MockStudentRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_is_email_taken().never();
        mock_repo
            .expect_update()
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service
            .update_student_by_id(
                id,
                StudentPatch {
                    name: Some("B".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_student() {
        let mut mock_repo = MockStudentRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service
            .update_student_by_id(Uuid::new_v4(), StudentPatch::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_student() {
        let mut mock_repo = MockStudentRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = StudentService::new(Arc::new(mock_repo));

        let result = service.delete_student_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_query_students_delegates_to_paginate() {
        let mut mock_repo = MockStudentRepository::new();
        mock_repo
            .expect_paginate()
            .withf(|filter, request| filter.is_empty() && request.limit == 10)
            .times(1)
            .returning(|_, request| Ok(Page::new(Vec::new(), request.page, request.limit, 0)));

        let service = StudentService::new(Arc::new(mock_repo));

        let page = service
            .query_students(Filter::new(), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_results, 0);
        assert_eq!(page.total_pages, 0);
    }
}
