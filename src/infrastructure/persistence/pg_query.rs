//! SQL rendering of the query model for PostgreSQL.
//!
//! Column names come exclusively from [`QueryField::column`], so only
//! identifiers compiled into the binary ever reach the SQL text. Every user
//! supplied value is bound.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::domain::query::{Criterion, Filter, Page, PageRequest, QueryField, SortDirection};
use crate::error::AppError;

/// Runs a paginated query against `table`.
///
/// Issues a `COUNT(*)` and a windowed `SELECT` with the same `WHERE` clause
/// concurrently. The two statements are not in a transaction, so a write
/// landing between them can make the count and the page disagree by that
/// write.
pub async fn paginate<T, R, F>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    filter: &Filter<F>,
    request: &PageRequest<F>,
) -> Result<Page<T>, AppError>
where
    F: QueryField,
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    T: TryFrom<R, Error = AppError>,
{
    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    count_query.push(table);
    push_where(&mut count_query, filter);

    let mut select_query = QueryBuilder::<Postgres>::new("SELECT ");
    select_query.push(columns).push(" FROM ").push(table);
    push_where(&mut select_query, filter);
    push_order_by(&mut select_query, request);
    select_query
        .push(" LIMIT ")
        .push_bind(i64::from(request.limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

    let (total, rows) = tokio::try_join!(
        count_query.build_query_scalar::<i64>().fetch_one(pool),
        select_query.build_query_as::<R>().fetch_all(pool),
    )?;

    let results = rows
        .into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(
        results,
        request.page,
        request.limit,
        u64::try_from(total).unwrap_or(0),
    ))
}

pub(crate) fn push_where<F: QueryField>(query: &mut QueryBuilder<'_, Postgres>, filter: &Filter<F>) {
    let mut separator = " WHERE ";

    if let Some(id) = filter.id() {
        query.push(separator).push("id = ").push_bind(id);
        separator = " AND ";
    }

    for (field, criterion) in filter.criteria() {
        query.push(separator).push(field.column());
        separator = " AND ";

        match criterion {
            Criterion::Exact(value) => {
                query.push(" = ").push_bind(value.clone());
            }
            Criterion::Pattern(pattern) => {
                query
                    .push(" ILIKE ")
                    .push_bind(like_pattern(pattern))
                    .push(" ESCAPE '\\'");
            }
        }
    }
}

pub(crate) fn push_order_by<F: QueryField>(
    query: &mut QueryBuilder<'_, Postgres>,
    request: &PageRequest<F>,
) {
    query.push(" ORDER BY ");
    for key in &request.sort {
        query.push(key.field.column());
        if key.field.is_text() {
            query.push(" COLLATE \"C\"");
        }
        query.push(" ");
        query.push(match key.direction {
            SortDirection::Asc => "ASC NULLS FIRST",
            SortDirection::Desc => "DESC NULLS LAST",
        });
        query.push(", ");
    }
    query.push("id ASC");
}

/// Translates a `*` wildcard pattern into a `LIKE` pattern, escaping the
/// characters `LIKE` treats specially.
pub(crate) fn like_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for c in pattern.chars() {
        match c {
            '*' => out.push('%'),
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
