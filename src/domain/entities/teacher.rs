//! Teacher entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Gender;
use crate::domain::query::{FieldValue, QueryField, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    /// Unique, stored lower-cased.
    pub email: String,
    pub gender: Gender,
    pub department: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn create(new: NewTeacher, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            gender: new.gender,
            department: new.department,
            address: new.address,
            phone: new.phone,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: TeacherPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(department) = patch.department {
            self.department = department;
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub department: String,
    pub address: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherField {
    Name,
    Email,
    Gender,
    Department,
    Address,
    Phone,
    CreatedAt,
    UpdatedAt,
}

impl QueryField for TeacherField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "gender" => Some(Self::Gender),
            "department" => Some(Self::Department),
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
            Self::Department => "department",
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

impl Record for Teacher {
    type Field = TeacherField;

    fn id(&self) -> Uuid {
        self.id
    }

    fn value(&self, field: TeacherField) -> FieldValue<'_> {
        match field {
            TeacherField::Name => FieldValue::Text(&self.name),
            TeacherField::Email => FieldValue::Text(&self.email),
            TeacherField::Gender => FieldValue::Text(self.gender.as_str()),
            TeacherField::Department => FieldValue::Text(&self.department),
            TeacherField::Address => FieldValue::Text(&self.address),
            TeacherField::Phone => FieldValue::OptionalText(self.phone.as_deref()),
            TeacherField::CreatedAt => FieldValue::Timestamp(self.created_at),
            TeacherField::UpdatedAt => FieldValue::Timestamp(self.updated_at),
        }
    }

    fn unique_email(&self) -> Option<&str> {
        Some(&self.email)
    }
}
