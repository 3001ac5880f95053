//! Student request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::parse_gender;
use crate::api::validation::rules::{NIL_ID, at_least_one, object_id, validate_gender};
use crate::api::validation::{FieldSpec, RequestSchema};
use crate::domain::entities::{Gender, NewStudent, Student, StudentField, StudentPatch};
use crate::domain::query::{Filter, PageRequest};
use crate::error::AppError;

/// Body of `POST /v1/students`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub phone: Option<String>,
}

impl RequestSchema for CreateStudentRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name").required(),
        FieldSpec::text("email").required().lowercase(),
        FieldSpec::text("gender").required(),
        FieldSpec::text("city").required(),
        FieldSpec::text("address").required(),
        FieldSpec::text("phone"),
    ];
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = AppError;

    fn try_from(body: CreateStudentRequest) -> Result<Self, Self::Error> {
        Ok(NewStudent {
            gender: parse_gender(&body.gender)?,
            name: body.name,
            email: body.email,
            city: body.city,
            address: body.address,
            phone: body.phone,
        })
    }
}

/// Body of `PATCH /v1/students/{studentId}`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_student_patch"))]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub phone: Option<String>,
}

fn validate_student_patch(body: &UpdateStudentRequest) -> Result<(), ValidationError> {
    at_least_one(&[
        body.name.is_some(),
        body.email.is_some(),
        body.gender.is_some(),
        body.city.is_some(),
        body.address.is_some(),
        body.phone.is_some(),
    ])
}

impl RequestSchema for UpdateStudentRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name"),
        FieldSpec::text("email").lowercase(),
        FieldSpec::text("gender"),
        FieldSpec::text("city"),
        FieldSpec::text("address"),
        FieldSpec::text("phone"),
    ];
}

impl TryFrom<UpdateStudentRequest> for StudentPatch {
    type Error = AppError;

    fn try_from(body: UpdateStudentRequest) -> Result<Self, Self::Error> {
        Ok(StudentPatch {
            gender: body.gender.as_deref().map(parse_gender).transpose()?,
            name: body.name,
            email: body.email,
            city: body.city,
            address: body.address,
            phone: body.phone,
        })
    }
}

/// Query string of `GET /v1/students`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    pub student_id: Option<Uuid>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "is not allowed to be empty"))]
    pub city: Option<String>,
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

impl RequestSchema for StudentListQuery {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::custom("studentId", object_id).placeholder(NIL_ID),
        FieldSpec::text("name"),
        FieldSpec::text("email").lowercase(),
        FieldSpec::text("gender"),
        FieldSpec::text("city"),
        FieldSpec::text("address"),
        FieldSpec::text("sortBy"),
        FieldSpec::integer("limit"),
        FieldSpec::integer("page"),
    ];
}

impl StudentListQuery {
    /// Splits the query into record filters and paging options.
    pub fn into_parts(self) -> (Filter<StudentField>, PageRequest<StudentField>) {
        let request = PageRequest::new(self.sort_by.as_deref(), self.limit, self.page);
        let filter = Filter::new()
            .with_id(self.student_id)
            .with(StudentField::Name, self.name)
            .with(StudentField::Email, self.email)
            .with(StudentField::Gender, self.gender)
            .with(StudentField::City, self.city)
            .with(StudentField::Address, self.address);

        (filter, request)
    }
}

/// Path parameters of `/v1/students/{studentId}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentPath {
    pub student_id: Uuid,
}

impl RequestSchema for StudentPath {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::custom("studentId", object_id)
        .required()
        .placeholder(NIL_ID)];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub city: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            gender: student.gender,
            city: student.city,
            address: student.address,
            phone: student.phone,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validation::{Location, parse_part};
    use crate::domain::query::{Criterion, SortDirection};
    use serde_json::json;

    #[test]
    fn test_create_request_into_new_student() {
        let body: CreateStudentRequest = parse_part(
            Location::Body,
            json!({
                "name": " Ann ",
                "email": "ANN@X.COM",
                "gender": "FEMALE",
                "city": "Oslo",
                "address": "Main st 1"
            }),
        )
        .unwrap();

        let new = NewStudent::try_from(body).unwrap();
        assert_eq!(new.name, "Ann");
        assert_eq!(new.email, "ann@x.com");
        assert_eq!(new.gender, Gender::Female);
        assert!(new.phone.is_none());
    }

    #[test]
    fn test_create_request_missing_fields() {
        let err = parse_part::<CreateStudentRequest>(Location::Body, json!({ "name": "A" }))
            .unwrap_err();

        let info = err.to_error_info();
        assert_eq!(info.details["fields"].as_array().unwrap().len(), 4);
        assert!(info.message.contains("\"email\" is required"));
    }

    #[test]
    fn test_empty_patch_rejected() {
        let err = parse_part::<UpdateStudentRequest>(Location::Body, json!({})).unwrap_err();

        let info = err.to_error_info();
        assert_eq!(info.message, "\"body\" must provide at least one field");
        assert_eq!(info.details["fields"][0]["code"], "min_fields");
    }

    #[test]
    fn test_patch_into_student_patch() {
        let body: UpdateStudentRequest =
            parse_part(Location::Body, json!({ "gender": "OTHER" })).unwrap();

        let patch = StudentPatch::try_from(body).unwrap();
        assert_eq!(patch.gender, Some(Gender::Other));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_list_query_into_parts() {
        let query: StudentListQuery = parse_part(
            Location::Query,
            json!({ "city": "Oslo", "name": "*an*", "sortBy": "name:desc", "limit": "5", "page": "2" }),
        )
        .unwrap();

        let (filter, request) = query.into_parts();
        assert_eq!(
            filter.criteria(),
            &[
                (StudentField::Name, Criterion::Pattern("*an*".to_string())),
                (StudentField::City, Criterion::Exact("Oslo".to_string())),
            ]
        );
        assert_eq!(request.limit, 5);
        assert_eq!(request.page, 2);
        assert_eq!(request.sort[0].field, StudentField::Name);
        assert_eq!(request.sort[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_list_query_rejects_empty_filters() {
        let err = parse_part::<StudentListQuery>(
            Location::Query,
            json!({ "name": "", "city": "  ", "sortBy": "" }),
        )
        .unwrap_err();

        let info = err.to_error_info();
        let fields: Vec<&str> = info.details["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["city", "name", "sortBy"]);
        assert!(info.message.contains("\"name\" is not allowed to be empty"));
    }

    #[test]
    fn test_list_query_student_id_filter() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let query: StudentListQuery =
            parse_part(Location::Query, json!({ "studentId": id })).unwrap();

        let (filter, _) = query.into_parts();
        assert_eq!(filter.id(), Some(Uuid::parse_str(id).unwrap()));
        assert!(filter.criteria().is_empty());

        let err = parse_part::<StudentListQuery>(Location::Query, json!({ "studentId": "42" }))
            .unwrap_err();
        assert_eq!(err.to_error_info().message, "\"studentId\" must be a valid id");
    }

    #[test]
    fn test_create_request_reports_type_and_rule_errors_together() {
        let err = parse_part::<CreateStudentRequest>(
            Location::Body,
            json!({ "name": 42, "email": "nope", "gender": "male", "city": "C", "address": "D" }),
        )
        .unwrap_err();

        let info = err.to_error_info();
        let codes: Vec<(&str, &str)> = info.details["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| (f["field"].as_str().unwrap(), f["code"].as_str().unwrap()))
            .collect();
        assert_eq!(
            codes,
            vec![("email", "email"), ("gender", "enum"), ("name", "type")]
        );
    }

    #[test]
    fn test_path_rejects_bad_id() {
        let err = parse_part::<StudentPath>(Location::Params, json!({ "studentId": "123" }))
            .unwrap_err();
        assert_eq!(err.to_error_info().message, "\"studentId\" must be a valid id");
    }

    #[test]
    fn test_response_is_camel_case() {
        let student = Student::create(
            NewStudent {
                name: "A".into(),
                email: "a@x.com".into(),
                gender: Gender::Male,
                city: "C".into(),
                address: "D".into(),
                phone: None,
            },
            Utc::now(),
        );

        let value = serde_json::to_value(StudentResponse::from(student)).unwrap();
        assert_eq!(value["gender"], "MALE");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("phone").is_none());
    }
}
