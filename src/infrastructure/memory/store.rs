//! Generic in-process record store.

use regex::Regex;
use serde_json::json;
use std::cmp::Ordering;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::query::{
    Criterion, FieldValue, Filter, Page, PageRequest, QueryField, Record, SortDirection,
};
use crate::error::{AppError, EMAIL_TAKEN};

/// Keeps records of one resource in memory and evaluates paginated queries
/// over them with the same semantics as the PostgreSQL repositories. Text
/// sorts by byte order, which the SQL side matches with `COLLATE "C"`.
///
/// The unique email index is emulated: inserts and updates that would give
/// two records the same email (ignoring ASCII case) are rejected with
/// [`AppError::Conflict`], exactly like a violated database index.
pub struct MemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub(crate) async fn insert(&self, record: T) -> Result<T, AppError> {
        let mut records = self.records.write().await;
        check_unique(&records, &record)?;
        records.push(record.clone());
        Ok(record)
    }

    pub(crate) async fn get(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    pub(crate) async fn email_taken(&self, email: &str, exclude_id: Option<Uuid>) -> bool {
        self.records.read().await.iter().any(|r| {
            Some(r.id()) != exclude_id
                && r.unique_email()
                    .is_some_and(|existing| existing.eq_ignore_ascii_case(email))
        })
    }

    /// Applies `change` to a copy of the record and stores it if the result
    /// still satisfies the unique index. Returns `None` for an unknown id.
    pub(crate) async fn modify(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut T),
    ) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let mut updated = records[index].clone();
        change(&mut updated);
        check_unique(&records, &updated)?;
        records[index] = updated.clone();

        Ok(Some(updated))
    }

    /// Removes a record. Returns `false` for an unknown id.
    pub(crate) async fn remove(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() != before
    }

    /// Filters, sorts and slices the stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a wildcard pattern cannot be compiled.
    pub async fn query_page(
        &self,
        filter: &Filter<T::Field>,
        request: &PageRequest<T::Field>,
    ) -> Result<Page<T>, AppError> {
        let matchers = filter
            .criteria()
            .iter()
            .map(|(field, criterion)| Matcher::new(*field, criterion))
            .collect::<Result<Vec<_>, _>>()?;

        let mut matching: Vec<T> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| filter.id().is_none_or(|id| record.id() == id))
            .filter(|record| matchers.iter().all(|m| m.matches(*record)))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            request
                .sort
                .iter()
                .fold(Ordering::Equal, |acc, key| {
                    acc.then_with(|| {
                        let ord = a.value(key.field).compare(&b.value(key.field));
                        match key.direction {
                            SortDirection::Asc => ord,
                            SortDirection::Desc => ord.reverse(),
                        }
                    })
                })
                .then_with(|| a.id().cmp(&b.id()))
        });

        let total_results = matching.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let results = matching
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .collect();

        Ok(Page::new(
            results,
            request.page,
            request.limit,
            total_results,
        ))
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<T: Record>(records: &[T], candidate: &T) -> Result<(), AppError> {
    let Some(email) = candidate.unique_email() else {
        return Ok(());
    };

    let clash = records.iter().any(|r| {
        r.id() != candidate.id()
            && r.unique_email()
                .is_some_and(|existing| existing.eq_ignore_ascii_case(email))
    });

    if clash {
        tracing::debug!(%email, "Unique email index violated");
        return Err(AppError::conflict(
            EMAIL_TAKEN,
            json!({ "constraint": "email_unique" }),
        ));
    }

    Ok(())
}

enum MatchRule {
    Exact(String),
    Pattern(Regex),
}

struct Matcher<F> {
    field: F,
    rule: MatchRule,
}

impl<F: QueryField> Matcher<F> {
    fn new(field: F, criterion: &Criterion) -> Result<Self, AppError> {
        let rule = match criterion {
            Criterion::Exact(value) => MatchRule::Exact(value.clone()),
            Criterion::Pattern(pattern) => {
                MatchRule::Pattern(wildcard_regex(pattern).map_err(|e| {
                    AppError::bad_request(
                        "Invalid filter pattern",
                        json!({ "pattern": pattern, "reason": e.to_string() }),
                    )
                })?)
            }
        };

        Ok(Self { field, rule })
    }

    fn matches<T: Record<Field = F>>(&self, record: &T) -> bool {
        let value: FieldValue<'_> = record.value(self.field);
        let Some(text) = value.as_text() else {
            return false;
        };

        match &self.rule {
            MatchRule::Exact(expected) => text == expected,
            MatchRule::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// Compiles a `*` wildcard pattern into an anchored, case-insensitive regex.
pub(crate) fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("(?is)^{body}$"))
}
