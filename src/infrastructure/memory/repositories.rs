//! Repository trait implementations backed by [`MemoryStore`].

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::entities::{
    Course, CourseField, CoursePatch, NewCourse, NewStudent, NewTeacher, Student, StudentField,
    StudentPatch, Teacher, TeacherField, TeacherPatch,
};
use crate::domain::query::{Filter, Page, PageRequest};
use crate::domain::repositories::{
    CourseRepository, StoreHealth, StudentRepository, TeacherRepository,
};
use crate::error::AppError;

#[async_trait]
impl StudentRepository for MemoryStore<Student> {
    async fn create(&self, new_student: NewStudent) -> Result<Student, AppError> {
        self.insert(Student::create(new_student, Utc::now())).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        Ok(self.get(id).await)
    }

    async fn is_email_taken(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        Ok(self.email_taken(email, exclude_id).await)
    }

    async fn update(&self, id: Uuid, patch: StudentPatch) -> Result<Student, AppError> {
        self.modify(id, |student| student.apply(patch, Utc::now()))
            .await?
            .ok_or_else(|| AppError::not_found("Student not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.remove(id).await {
            Ok(())
        } else {
            Err(AppError::not_found("Student not found", json!({ "id": id })))
        }
    }

    async fn paginate(
        &self,
        filter: Filter<StudentField>,
        request: PageRequest<StudentField>,
    ) -> Result<Page<Student>, AppError> {
        self.query_page(&filter, &request).await
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore<Teacher> {
    async fn create(&self, new_teacher: NewTeacher) -> Result<Teacher, AppError> {
        self.insert(Teacher::create(new_teacher, Utc::now())).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, AppError> {
        Ok(self.get(id).await)
    }

    async fn is_email_taken(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        Ok(self.email_taken(email, exclude_id).await)
    }

    async fn update(&self, id: Uuid, patch: TeacherPatch) -> Result<Teacher, AppError> {
        self.modify(id, |teacher| teacher.apply(patch, Utc::now()))
            .await?
            .ok_or_else(|| AppError::not_found("Teacher not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.remove(id).await {
            Ok(())
        } else {
            Err(AppError::not_found("Teacher not found", json!({ "id": id })))
        }
    }

    async fn paginate(
        &self,
        filter: Filter<TeacherField>,
        request: PageRequest<TeacherField>,
    ) -> Result<Page<Teacher>, AppError> {
        self.query_page(&filter, &request).await
    }
}

#[async_trait]
impl CourseRepository for MemoryStore<Course> {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        self.insert(Course::create(new_course, Utc::now())).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        Ok(self.get(id).await)
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Course, AppError> {
        self.modify(id, |course| course.apply(patch, Utc::now()))
            .await?
            .ok_or_else(|| AppError::not_found("Course not found", json!({ "id": id })))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.remove(id).await {
            Ok(())
        } else {
            Err(AppError::not_found("Course not found", json!({ "id": id })))
        }
    }

    async fn paginate(
        &self,
        filter: Filter<CourseField>,
        request: PageRequest<CourseField>,
    ) -> Result<Page<Course>, AppError> {
        self.query_page(&filter, &request).await
    }
}

/// Health probe for the in-process store. Always healthy.
pub struct MemoryHealth;

#[async_trait]
impl StoreHealth for MemoryHealth {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
