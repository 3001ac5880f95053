//! Teacher request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::parse_gender;
use crate::api::validation::rules::{NIL_ID, at_least_one, object_id, validate_gender};
use crate::api::validation::{FieldSpec, RequestSchema};
use crate::domain::entities::{Gender, NewTeacher, Teacher, TeacherField, TeacherPatch};
use crate::domain::query::{Filter, PageRequest};
use crate::error::AppError;

/// Body of `POST /v1/teachers`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub phone: Option<String>,
}

impl RequestSchema for CreateTeacherRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name").required(),
        FieldSpec::text("email").required().lowercase(),
        FieldSpec::text("gender").required(),
        FieldSpec::text("department").required(),
        FieldSpec::text("address").required(),
        FieldSpec::text("phone"),
    ];
}

impl TryFrom<CreateTeacherRequest> for NewTeacher {
    type Error = AppError;

    fn try_from(body: CreateTeacherRequest) -> Result<Self, Self::Error> {
        Ok(NewTeacher {
            gender: parse_gender(&body.gender)?,
            name: body.name,
            email: body.email,
            department: body.department,
            address: body.address,
            phone: body.phone,
        })
    }
}

/// Body of `PATCH /v1/teachers/{teacherId}`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_teacher_patch"))]
pub struct UpdateTeacherRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub phone: Option<String>,
}

fn validate_teacher_patch(body: &UpdateTeacherRequest) -> Result<(), ValidationError> {
    at_least_one(&[
        body.name.is_some(),
        body.email.is_some(),
        body.gender.is_some(),
        body.department.is_some(),
        body.address.is_some(),
        body.phone.is_some(),
    ])
}

impl RequestSchema for UpdateTeacherRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name"),
        FieldSpec::text("email").lowercase(),
        FieldSpec::text("gender"),
        FieldSpec::text("department"),
        FieldSpec::text("address"),
        FieldSpec::text("phone"),
    ];
}

impl TryFrom<UpdateTeacherRequest> for TeacherPatch {
    type Error = AppError;

    fn try_from(body: UpdateTeacherRequest) -> Result<Self, Self::Error> {
        Ok(TeacherPatch {
            gender: body.gender.as_deref().map(parse_gender).transpose()?,
            name: body.name,
            email: body.email,
            department: body.department,
            address: body.address,
            phone: body.phone,
        })
    }
}

/// Query string of `GET /v1/teachers`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherListQuery {
    pub teacher_id: Option<Uuid>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub sort_by: Option<String>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub page: Option<i64>,
}

impl RequestSchema for TeacherListQuery {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::custom("teacherId", object_id).placeholder(NIL_ID),
        FieldSpec::text("name"),
        FieldSpec::text("email").lowercase(),
        FieldSpec::text("gender"),
        FieldSpec::text("department"),
        FieldSpec::text("address"),
        FieldSpec::text("sortBy"),
        FieldSpec::integer("limit"),
        FieldSpec::integer("page"),
    ];
}

impl TeacherListQuery {
    /// Splits the query into record filters and paging options.
    pub fn into_parts(self) -> (Filter<TeacherField>, PageRequest<TeacherField>) {
        let request = PageRequest::new(self.sort_by.as_deref(), self.limit, self.page);
        let filter = Filter::new()
            .with_id(self.teacher_id)
            .with(TeacherField::Name, self.name)
            .with(TeacherField::Email, self.email)
            .with(TeacherField::Gender, self.gender)
            .with(TeacherField::Department, self.department)
            .with(TeacherField::Address, self.address);

        (filter, request)
    }
}

/// Path parameters of `/v1/teachers/{teacherId}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPath {
    pub teacher_id: Uuid,
}

impl RequestSchema for TeacherPath {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::custom("teacherId", object_id)
        .required()
        .placeholder(NIL_ID)];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub department: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherResponse {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name,
            email: teacher.email,
            gender: teacher.gender,
            department: teacher.department,
            address: teacher.address,
            phone: teacher.phone,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}
