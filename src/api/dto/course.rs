//! Course request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::validation::rules::{NIL_ID, at_least_one, object_id};
use crate::api::validation::{FieldSpec, RequestSchema};
use crate::domain::entities::{Course, CourseField, CoursePatch, NewCourse};
use crate::domain::query::{Filter, PageRequest};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub faculty: String,
}

impl RequestSchema for CreateCourseRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name").required(),
        FieldSpec::text("department").required(),
        FieldSpec::text("faculty").required(),
    ];
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(body: CreateCourseRequest) -> Self {
        NewCourse {
            name: body.name,
            department: body.department,
            faculty: body.faculty,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_course_patch"))]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub faculty: Option<String>,
}

fn validate_course_patch(body: &UpdateCourseRequest) -> Result<(), ValidationError> {
    at_least_one(&[
        body.name.is_some(),
        body.department.is_some(),
        body.faculty.is_some(),
    ])
}

impl RequestSchema for UpdateCourseRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name"),
        FieldSpec::text("department"),
        FieldSpec::text("faculty"),
    ];
}

impl From<UpdateCourseRequest> for CoursePatch {
    fn from(body: UpdateCourseRequest) -> Self {
        CoursePatch {
            name: body.name,
            department: body.department,
            faculty: body.faculty,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseListQuery {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub faculty: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub sort_by: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub page: Option<i64>,
}

impl RequestSchema for CourseListQuery {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name"),
        FieldSpec::text("department"),
        FieldSpec::text("faculty"),
        FieldSpec::text("sortBy"),
        FieldSpec::integer("limit"),
        FieldSpec::integer("page"),
    ];
}

impl CourseListQuery {
    pub fn into_parts(self) -> (Filter<CourseField>, PageRequest<CourseField>) {
        let request = PageRequest::new(self.sort_by.as_deref(), self.limit, self.page);
        let filter = Filter::new()
            .with(CourseField::Name, self.name)
            .with(CourseField::Department, self.department)
            .with(CourseField::Faculty, self.faculty);

        (filter, request)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoursePath {
    pub course_id: Uuid,
}

impl RequestSchema for CoursePath {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::custom("courseId", object_id)
        .required()
        .placeholder(NIL_ID)];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            department: course.department,
            faculty: course.faculty,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}
