//! Filtered pagination shared by every listable resource.
//!
//! Both the count and the data query are assembled from the same untrusted
//! [`ListParams`] through [`push_filters`], so the returned `meta.total`
//! always describes the same filter the page was cut from. Sort columns are
//! resolved against each resource's allow-list; raw query input is never
//! interpolated into SQL.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::utils::error::AppError;

pub mod params;

pub use params::{ListParams, Page, PageMeta, SortOrder};

/// A database-backed entity that supports the shared list/get/delete
/// operations.
pub trait Resource {
    /// Human-readable name used in error messages.
    const NAME: &'static str = "Resource";

    /// Table the resource lives in.
    const TABLE: &'static str;

    /// Comma-separated select list covering every column of the resource.
    const COLUMNS: &'static str;

    /// Allow-list of sortable fields: (API field name, SQL column).
    const SORTABLE: &'static [(&'static str, &'static str)];

    const DEFAULT_SORT_COLUMN: &'static str = "created_at";

    /// Resolves a requested sort field against the allow-list, falling back
    /// to the default column for unknown or absent values.
    fn sort_column(requested: Option<&str>) -> &'static str {
        requested
            .and_then(|name| Self::SORTABLE.iter().find(|(api, _)| *api == name))
            .map_or(Self::DEFAULT_SORT_COLUMN, |(_, column)| *column)
    }
}

/// Runs the count + data queries for one page of `T` and wraps the result
/// in `{ meta, data }`.
pub async fn fetch_page<T>(pool: &PgPool, params: &ListParams) -> Result<Page<T>, AppError>
where
    T: Resource + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let page = params.page();
    let limit = params.limit();

    let mut count_query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
    push_filters(&mut count_query, params);
    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut data_query = QueryBuilder::new(format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE));
    push_filters(&mut data_query, params);
    data_query.push(format!(
        " ORDER BY {} {}",
        T::sort_column(params.sort_by.as_deref()),
        params.order().as_sql()
    ));
    data_query
        .push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(params.offset());

    let data = data_query.build_query_as::<T>().fetch_all(pool).await?;

    Ok(Page {
        meta: PageMeta::new(total, page, limit),
        data,
    })
}

/// Fetches a single record by id; NotFound when absent.
pub async fn find_by_id<T>(pool: &PgPool, id: Uuid) -> Result<T, AppError>
where
    T: Resource + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);

    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", T::NAME)))
}

/// Hard-deletes a record by id; NotFound when no row was removed.
pub async fn delete_by_id<T: Resource>(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);

    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} not found", T::NAME)));
    }

    Ok(())
}

/// Appends the WHERE clause shared by the count and data queries.
///
/// `search` matches name/email case-insensitively and phone case-sensitively,
/// OR-combined; `city` and `status` are exact matches. The three families are
/// AND-combined.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, params: &ListParams) {
    let mut sep = " WHERE ";

    if let Some(search) = params.search() {
        let pattern = like_pattern(search);
        qb.push(sep)
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR phone LIKE ")
            .push_bind(pattern)
            .push(")");
        sep = " AND ";
    }

    if let Some(city) = params.city() {
        qb.push(sep).push("city = ").push_bind(city.to_string());
        sep = " AND ";
    }

    if let Some(status) = params.status() {
        qb.push(sep).push("status = ").push_bind(status.to_string());
    }
}

/// Wraps a search needle in `%...%`, escaping LIKE metacharacters so user
/// input only ever matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl Resource for Widget {
        const NAME: &'static str = "Widget";
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static str = "id, name, created_at";
        const SORTABLE: &'static [(&'static str, &'static str)] =
            &[("name", "name"), ("createdAt", "created_at")];
    }

    #[test]
    fn test_sort_column_resolution() {
        assert_eq!(Widget::sort_column(Some("name")), "name");
        assert_eq!(Widget::sort_column(Some("createdAt")), "created_at");
        // Unknown and absent values fall back to the default
        assert_eq!(Widget::sort_column(Some("id; DROP TABLE widgets")), "created_at");
        assert_eq!(Widget::sort_column(None), "created_at");
    }

    #[test]
    fn test_no_filters_builds_bare_query() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM widgets");
        push_filters(&mut qb, &ListParams::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM widgets");
    }

    #[test]
    fn test_all_filter_families_are_and_combined() {
        let params = ListParams {
            search: Some("ann".to_string()),
            city: Some("Pune".to_string()),
            status: Some("active".to_string()),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM widgets");
        push_filters(&mut qb, &params);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM widgets \
             WHERE (name ILIKE $1 OR email ILIKE $2 OR phone LIKE $3) \
             AND city = $4 AND status = $5"
        );
    }

    #[test]
    fn test_single_exact_filter() {
        let params = ListParams {
            status: Some("inactive".to_string()),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM widgets");
        push_filters(&mut qb, &params);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM widgets WHERE status = $1");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
    }
}
