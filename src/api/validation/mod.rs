//! Request validation engine.
//!
//! Every request part (path params, query string, JSON body) is checked
//! against a declared schema before any handler code runs. Validation runs in
//! two phases:
//!
//! 1. **Shape** ([`schema`]) - unknown keys, missing required keys, JSON types
//!    and pluggable custom checks (such as the record id format) are checked
//!    against the part's [`FieldSpec`] list. Text is trimmed and emails are
//!    lower-cased here, so later code only ever sees normalized values.
//! 2. **Rules** - the normalized part is deserialized into its typed DTO and
//!    the DTO's `validator` rules run (email format, enum membership,
//!    "at least one field" for patches). Keys that failed the shape check are
//!    replaced by placeholders first, so rules still run on every other key.
//!
//! Errors of both phases, and of every part a handler takes, are reported
//! together as one [`AppError::Validation`](crate::error::AppError::Validation)
//! with one [`FieldError`] per problem.

pub mod extract;
pub mod rules;
pub mod schema;

pub use extract::{ValidatedJson, ValidatedPath, ValidatedPathJson, ValidatedQuery};
pub use schema::{FieldKind, FieldSpec, RequestSchema, parse_part, validate_part};

use serde::Serialize;
use std::fmt;

/// Request part a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Query,
    Body,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Params => "params",
            Location::Query => "query",
            Location::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: Location,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        location: Location,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            location,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Flattens `validator` errors into field errors.
    ///
    /// Struct-level errors (reported under `__all__`) are attributed to the
    /// request part itself. `validator` keys errors by Rust field name, so
    /// names are converted to the camelCase keys clients send. Messages are
    /// prefixed with the quoted field name, e.g. `"email" must be a valid email`.
    pub fn from_validator(location: Location, errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut out = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            let field: &str = field.as_ref();
            let name = if field == "__all__" {
                location.as_str().to_string()
            } else {
                camel_case(field)
            };

            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => format!("\"{name}\" {message}"),
                    None => format!("\"{name}\" failed the {} check", error.code),
                };
                out.push(FieldError::new(
                    location,
                    name.as_str(),
                    error.code.to_string(),
                    message,
                ));
            }
        }

        out.sort_by(|a, b| a.field.cmp(&b.field).then(a.code.cmp(&b.code)));
        out
    }
}

/// `sort_by` -> `sortBy`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
