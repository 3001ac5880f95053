//! Business logic services for the application layer.

pub mod course_service;
pub mod student_service;
pub mod teacher_service;

pub use course_service::CourseService;
pub use student_service::StudentService;
pub use teacher_service::TeacherService;
