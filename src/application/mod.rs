//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls: uniqueness check, persist, return.
//! They hold no state of their own beyond the injected repository.
//!
//! # Available Services
//!
//! - [`services::student_service::StudentService`] - Student records
//! - [`services::teacher_service::TeacherService`] - Teacher records
//! - [`services::course_service::CourseService`] - Course records

pub mod services;
