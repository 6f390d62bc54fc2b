//! Statement execution for dynamically assembled SQL (partial updates, filtered lists).

use crate::error::AppError;
use crate::sql::BindValue;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub(crate) async fn fetch_optional_as<T>(
    pool: &PgPool,
    sql: &str,
    params: Vec<BindValue>,
) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query_as::<_, T>(sql);
    for p in params {
        query = query.bind(p);
    }
    Ok(query.fetch_optional(pool).await?)
}

pub(crate) async fn fetch_all_as<T>(pool: &PgPool, sql: &str, params: Vec<BindValue>) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query_as::<_, T>(sql);
    for p in params {
        query = query.bind(p);
    }
    Ok(query.fetch_all(pool).await?)
}
