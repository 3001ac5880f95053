//! Declarative request-part schemas and the two-phase validation pipeline.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::{FieldError, Location};
use crate::error::AppError;

/// Phase-one check for string fields. Returns the message tail on failure,
/// e.g. `"must be a valid id"`.
pub type CustomCheck = fn(&str) -> Result<(), &'static str>;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// JSON string.
    Text,
    /// Integer, given either as a JSON number or as a numeric string
    /// (query strings carry everything as text).
    Integer,
    /// JSON string that must also pass the given check.
    Custom(CustomCheck),
}

/// Declaration of a single key allowed in a request part.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub trim: bool,
    pub lowercase: bool,
    /// Stand-in value used in phase two when this key failed phase one or
    /// is missing although required. Must deserialize into the DTO field.
    pub placeholder: &'static str,
}

impl FieldSpec {
    /// Optional, trimmed string.
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: false,
            trim: true,
            lowercase: false,
            placeholder: "",
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: false,
            trim: false,
            lowercase: false,
            placeholder: "0",
        }
    }

    pub const fn custom(name: &'static str, check: CustomCheck) -> Self {
        Self {
            name,
            kind: FieldKind::Custom(check),
            required: false,
            trim: true,
            lowercase: false,
            placeholder: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    pub const fn placeholder(mut self, value: &'static str) -> Self {
        self.placeholder = value;
        self
    }

    /// Type-checks `value` and normalizes it in place.
    fn normalize(&self, location: Location, value: &mut Value) -> Result<(), FieldError> {
        let name = self.name;
        let fail = |code: &str, tail: &str| {
            FieldError::new(location, name, code, format!("\"{name}\" {tail}"))
        };

        match self.kind {
            FieldKind::Text | FieldKind::Custom(_) => {
                let Value::String(text) = value else {
                    return Err(fail("type", "must be a string"));
                };

                if self.trim {
                    let trimmed = text.trim();
                    if trimmed.len() != text.len() {
                        *text = trimmed.to_string();
                    }
                }
                if self.lowercase {
                    *text = text.to_lowercase();
                }

                if let FieldKind::Custom(check) = self.kind {
                    check(text.as_str()).map_err(|tail| fail("invalid", tail))?;
                }
                Ok(())
            }
            FieldKind::Integer => match value {
                Value::Number(n) if n.is_i64() => Ok(()),
                Value::Number(_) => Err(fail("type", "must be an integer")),
                Value::String(text) => {
                    let parsed = text
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| fail("type", "must be a number"))?;
                    // Normalized text is what the DTO's string fallback sees.
                    *text = parsed.to_string();
                    Ok(())
                }
                _ => Err(fail("type", "must be a number")),
            },
        }
    }
}

/// A typed request part with a declared key set.
///
/// `FIELDS` drives phase one; the `validator` rules on the type drive phase
/// two. DTO field names (after serde renames) must match the declared names.
pub trait RequestSchema: DeserializeOwned + Validate + Send {
    const FIELDS: &'static [FieldSpec];
}

/// Phase one: unknown keys, required keys, types and custom checks.
///
/// Collects every problem instead of stopping at the first. The returned
/// object has unknown keys dropped, and every key that failed (or is missing
/// although required) holds its placeholder, so phase two can still run over
/// the keys that passed.
pub fn check_shape(
    location: Location,
    fields: &[FieldSpec],
    mut object: Map<String, Value>,
) -> (Map<String, Value>, Vec<FieldError>) {
    let mut errors = Vec::new();

    object.retain(|key, _| {
        let known = fields.iter().any(|spec| spec.name == key);
        if !known {
            errors.push(FieldError::new(
                location,
                key.as_str(),
                "unknown",
                format!("\"{key}\" is not allowed"),
            ));
        }
        known
    });

    for spec in fields {
        let problem = match object.get_mut(spec.name) {
            Some(value) => spec.normalize(location, value).err(),
            None if spec.required => Some(FieldError::new(
                location,
                spec.name,
                "required",
                format!("\"{}\" is required", spec.name),
            )),
            None => None,
        };

        if let Some(error) = problem {
            errors.push(error);
            object.insert(
                spec.name.to_string(),
                Value::String(spec.placeholder.to_string()),
            );
        }
    }

    (object, errors)
}

/// Runs both phases over one request part.
///
/// Rule errors are reported for every key that passed phase one, alongside
/// the phase-one errors, so a single response lists every problem of the
/// part.
pub fn validate_part<T: RequestSchema>(
    location: Location,
    value: Value,
) -> Result<T, Vec<FieldError>> {
    let Value::Object(object) = value else {
        return Err(vec![FieldError::new(
            location,
            location.as_str(),
            "type",
            format!("\"{location}\" must be an object"),
        )]);
    };

    let (object, mut errors) = check_shape(location, T::FIELDS, object);

    let dto: T = match serde_json::from_value(Value::Object(object)) {
        Ok(dto) => dto,
        Err(_) if !errors.is_empty() => return Err(errors),
        Err(e) => {
            return Err(vec![FieldError::new(
                location,
                location.as_str(),
                "type",
                format!("\"{location}\" is malformed: {e}"),
            )]);
        }
    };

    if let Err(rule_errors) = dto.validate() {
        // Placeholders of failed keys are not the client's input.
        let rule_errors: Vec<FieldError> = FieldError::from_validator(location, &rule_errors)
            .into_iter()
            .filter(|rule| errors.iter().all(|shape| shape.field != rule.field))
            .collect();
        errors.extend(rule_errors);
    }

    if errors.is_empty() {
        Ok(dto)
    } else {
        Err(errors)
    }
}

/// [`validate_part`] rendered as [`AppError::Validation`].
pub fn parse_part<T: RequestSchema>(location: Location, value: Value) -> Result<T, AppError> {
    validate_part(location, value).map_err(AppError::from_field_errors)
}

/// Converts raw string pairs (query string, path params) into a JSON object.
pub fn object_from_pairs<I>(pairs: I) -> Value
where
    I: IntoIterator<Item = (String, String)>,
{
    Value::Object(
        pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    )
}
