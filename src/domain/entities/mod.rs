//! Core domain entities.
//!
//! Entities are plain data structures. Each resource follows the same shape:
//!
//! - the persisted record (`Student`, `Teacher`, `Course`)
//! - `New*` - input for creating a record
//! - `*Patch` - partial update, `None` leaves a field unchanged
//! - `*Field` - the fields a query may filter or sort on

pub mod course;
pub mod gender;
pub mod student;
pub mod teacher;

pub use course::{Course, CourseField, CoursePatch, NewCourse};
pub use gender::{Gender, UnknownGender};
pub use student::{NewStudent, Student, StudentField, StudentPatch};
pub use teacher::{NewTeacher, Teacher, TeacherField, TeacherPatch};
