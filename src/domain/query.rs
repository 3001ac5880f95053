//! Store-agnostic query model: filters, sort keys and pagination.
//!
//! A paginated query is a [`Filter`] plus a [`PageRequest`]. Repositories
//! answer it with a [`Page`]. Field names never travel as raw strings past
//! this module: every resource declares a [`QueryField`] enum, so a store
//! only ever sees fields the resource actually has.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Debug;
use uuid::Uuid;

/// Default page size when `limit` is absent or not positive.
pub const DEFAULT_LIMIT: u32 = 10;

/// Default page number when `page` is absent or not positive.
pub const DEFAULT_PAGE: u32 = 1;

/// A field of a resource that can be filtered and sorted on.
pub trait QueryField: Copy + Eq + Debug + Send + Sync + 'static {
    /// Resolves the public (JSON) field name, e.g. `createdAt`.
    fn parse(name: &str) -> Option<Self>;

    /// Storage column backing this field.
    fn column(self) -> &'static str;

    /// Whether the field holds text. Text sorts by byte order in every store.
    fn is_text(self) -> bool;

    /// Field used when a query carries no usable sort key.
    fn default_sort() -> Self;
}

/// Borrowed value of a single record field, used by in-process evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    OptionalText(Option<&'a str>),
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Text view of the value; `None` for nulls and timestamps.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::OptionalText(s) => *s,
            FieldValue::Timestamp(_) => None,
        }
    }

    /// Total order used for sorting. Nulls order before any value.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

/// A persisted entity the query engine can evaluate.
pub trait Record: Clone + Send + Sync + 'static {
    type Field: QueryField;

    fn id(&self) -> Uuid;

    fn value(&self, field: Self::Field) -> FieldValue<'_>;

    /// Value of the unique email index, if the resource has one.
    fn unique_email(&self) -> Option<&str> {
        None
    }
}

/// Match criterion for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Value must equal the text exactly.
    Exact(String),
    /// Case-insensitive wildcard pattern where `*` matches any run of characters.
    Pattern(String),
}

impl Criterion {
    /// Interprets a raw filter value: anything containing `*` is a pattern.
    pub fn from_input(value: String) -> Self {
        if value.contains('*') {
            Criterion::Pattern(value)
        } else {
            Criterion::Exact(value)
        }
    }
}

/// Conjunction of field criteria plus an optional record id. Absent fields
/// impose no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<F> {
    id: Option<Uuid>,
    criteria: Vec<(F, Criterion)>,
}

impl<F> Default for Filter<F> {
    fn default() -> Self {
        Self {
            id: None,
            criteria: Vec::new(),
        }
    }
}

impl<F: QueryField> Filter<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion for `field` when `value` is present.
    pub fn with(mut self, field: F, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.criteria.push((field, Criterion::from_input(value)));
        }
        self
    }

    /// Restricts the match to the record with this id, when given.
    pub fn with_id(mut self, id: Option<Uuid>) -> Self {
        if id.is_some() {
            self.id = id;
        }
        self
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn criteria(&self) -> &[(F, Criterion)] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.criteria.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Parses a `field:direction[,field:direction...]` sort expression.
///
/// `desc` sorts descending, any other direction (or none) ascending. Unknown
/// fields are skipped. Falls back to [`QueryField::default_sort`] ascending
/// when nothing usable remains.
pub fn parse_sort<F: QueryField>(sort_by: Option<&str>) -> Vec<SortKey<F>> {
    let mut keys: Vec<SortKey<F>> = Vec::new();

    for option in sort_by.unwrap_or_default().split(',') {
        let mut parts = option.trim().splitn(2, ':');
        let Some(field) = parts.next().and_then(|name| F::parse(name.trim())) else {
            continue;
        };
        let direction = match parts.next().map(str::trim) {
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        if keys.iter().all(|k| k.field != field) {
            keys.push(SortKey { field, direction });
        }
    }

    if keys.is_empty() {
        keys.push(SortKey {
            field: F::default_sort(),
            direction: SortDirection::Asc,
        });
    }

    keys
}

/// Sort keys plus page window for a paginated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub sort: Vec<SortKey<F>>,
    pub limit: u32,
    pub page: u32,
}

impl<F: QueryField> PageRequest<F> {
    /// Builds a request from raw options. Absent or non-positive `limit` and
    /// `page` fall back to [`DEFAULT_LIMIT`] and [`DEFAULT_PAGE`].
    pub fn new(sort_by: Option<&str>, limit: Option<i64>, page: Option<i64>) -> Self {
        Self {
            sort: parse_sort(sort_by),
            limit: positive_or(limit, DEFAULT_LIMIT),
            page: positive_or(page, DEFAULT_PAGE),
        }
    }

    /// Number of matching records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl<F: QueryField> Default for PageRequest<F> {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => default,
    }
}

/// One page of results plus metadata about the whole match set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, page: u32, limit: u32, total_results: u64) -> Self {
        Self {
            results,
            page,
            limit,
            total_pages: total_pages(total_results, limit),
            total_results,
        }
    }

    /// Converts every result, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

/// `ceil(total_results / limit)`; zero for a zero limit.
pub fn total_pages(total_results: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_results.div_ceil(u64::from(limit))
}
