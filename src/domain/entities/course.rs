//! Course entity. Courses carry no unique fields.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::query::{FieldValue, QueryField, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn create(new: NewCourse, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            department: new.department,
            faculty: new.faculty,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CoursePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(faculty) = patch.faculty {
            self.faculty = faculty;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub department: String,
    pub faculty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub department: Option<String>,
    pub faculty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Department,
    Faculty,
    CreatedAt,
    UpdatedAt,
}

impl QueryField for CourseField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "department" => Some(Self::Department),
            "faculty" => Some(Self::Faculty),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Department => "department",
            Self::Faculty => "faculty",
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

impl Record for Course {
    type Field = CourseField;

    fn id(&self) -> Uuid {
        self.id
    }

    fn value(&self, field: CourseField) -> FieldValue<'_> {
        match field {
            CourseField::Name => FieldValue::Text(&self.name),
            CourseField::Department => FieldValue::Text(&self.department),
            CourseField::Faculty => FieldValue::Text(&self.faculty),
            CourseField::CreatedAt => FieldValue::Timestamp(self.created_at),
            CourseField::UpdatedAt => FieldValue::Timestamp(self.updated_at),
        }
    }
}
