//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs implement [`RequestSchema`](crate::api::validation::RequestSchema)
//! so they can only be built through the validation extractors. Response DTOs
//! use camelCase keys.

pub mod course;
pub mod health;
pub mod student;
pub mod teacher;

use serde_json::json;

use crate::domain::entities::{Gender, UnknownGender};
use crate::error::AppError;

/// Converts an already validated gender string into the domain value.
pub(crate) fn parse_gender(value: &str) -> Result<Gender, AppError> {
    value
        .parse()
        .map_err(|e: UnknownGender| AppError::bad_request(e.to_string(), json!({ "field": "gender" })))
}
