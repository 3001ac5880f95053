//! Reusable field checks.
//!
//! [`object_id`] is a phase-one [`CustomCheck`](super::schema::CustomCheck);
//! the `validate_*` functions plug into `#[validate(custom(...))]` and
//! `#[validate(schema(...))]` attributes on DTOs.

use std::borrow::Cow;
use uuid::Uuid;
use validator::ValidationError;

use crate::domain::entities::Gender;

/// Placeholder id for [`FieldSpec::placeholder`](super::FieldSpec::placeholder).
pub const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Accepts only the store's native identifier format (a UUID).
pub fn object_id(value: &str) -> Result<(), &'static str> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| "must be a valid id")
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    if Gender::VALUES.contains(&value) {
        return Ok(());
    }

    Err(ValidationError::new("enum").with_message(Cow::Owned(format!(
        "must be one of [{}]",
        Gender::VALUES.join(", ")
    ))))
}

/// Fails unless at least one of the flags is set. Used by patch bodies.
pub fn at_least_one(present: &[bool]) -> Result<(), ValidationError> {
    if present.iter().any(|p| *p) {
        return Ok(());
    }

    Err(ValidationError::new("min_fields")
        .with_message(Cow::Borrowed("must provide at least one field")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        assert!(object_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
        assert_eq!(object_id("5ebac534954b54139806c112"), Err("must be a valid id"));
        assert!(object_id("").is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("FEMALE").is_ok());

        let err = validate_gender("female").unwrap_err();
        assert_eq!(err.code, "enum");
        assert_eq!(
            err.message.as_deref(),
            Some("must be one of [MALE, FEMALE, OTHER]")
        );
    }

    #[test]
    fn test_at_least_one() {
        assert!(at_least_one(&[false, true]).is_ok());
        assert_eq!(at_least_one(&[false, false]).unwrap_err().code, "min_fields");
        assert!(at_least_one(&[]).is_err());
    }
}
