//! Student entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Gender;
use crate::domain::query::{FieldValue, QueryField, Record};

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// Unique, stored lower-cased.
    pub email: String,
    pub gender: Gender,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Materializes a new record with a fresh id and timestamps.
    pub fn create(new: NewStudent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            gender: new.gender,
            city: new.city,
            address: new.address,
            phone: new.phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the provided patch fields and bumps `updated_at`.
    pub fn apply(&mut self, patch: StudentPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        self.updated_at = now;
    }
}

/// Input data for creating a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Filterable and sortable student fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    Email,
    Gender,
    City,
    Address,
    Phone,
    CreatedAt,
    UpdatedAt,
}

impl QueryField for StudentField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "gender" => Some(Self::Gender),
            "city" => Some(Self::City),
            "address" => Some(Self::Address),
            "phone" => Some(Self::Phone),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::City => "city",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn is_text(self) -> bool {
        !matches!(self, Self::CreatedAt | Self::UpdatedAt)
    }

    fn default_sort() -> Self {
        Self::CreatedAt
    }
}

impl Record for Student {
    type Field = StudentField;

    fn id(&self) -> Uuid {
        self.id
    }

    fn value(&self, field: StudentField) -> FieldValue<'_> {
        match field {
            StudentField::Name => FieldValue::Text(&self.name),
            StudentField::Email => FieldValue::Text(&self.email),
            StudentField::Gender => FieldValue::Text(self.gender.as_str()),
            StudentField::City => FieldValue::Text(&self.city),
            StudentField::Address => FieldValue::Text(&self.address),
            StudentField::Phone => FieldValue::OptionalText(self.phone.as_deref()),
            StudentField::CreatedAt => FieldValue::Timestamp(self.created_at),
            StudentField::UpdatedAt => FieldValue::Timestamp(self.updated_at),
        }
    }

    fn unique_email(&self) -> Option<&str> {
        Some(&self.email)
    }
}
