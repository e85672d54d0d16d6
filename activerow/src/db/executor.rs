use thiserror::Error;

use sqlx::PgPool;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{self, Postgres};
use tracing;

use crate::db::sql::SqlError;
use crate::validation::ValidationError;

#[derive(Debug)]
pub enum IntegrityKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
    Exclusion,
    Other(String),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("integrity violation")]
    Integrity {
        kind: IntegrityKind,
        constraint: Option<String>,
        #[source]
        source: sqlx::Error,
    },
    #[error("record not found")]
    DoesNotExist,
    #[error("temporary database failure")]
    Temporary,
    #[error("bind error: {0}")]
    Bind(String),
    #[error("no database installed")]
    NotConfigured,
    #[error("malformed statement")]
    Statement(#[from] SqlError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("populate error: {0}")]
    Populate(String),
    #[error("bad query")]
    BadQuery,
    #[error("unhandled db error")]
    Fatal(sqlx::Error),
}

impl DbError {
    pub const fn code(&self) -> &'static str {
        match self {
            DbError::Integrity { .. } => "integrity_violation",
            DbError::DoesNotExist => "not_found",
            DbError::Temporary => "temporary_error",
            DbError::Bind(_) => "bind_error",
            DbError::NotConfigured => "not_configured",
            DbError::Statement(_) => "bad_statement",
            DbError::Validation(_) => "validation_failed",
            DbError::Populate(_) => "populate_error",
            DbError::BadQuery => "bad_query",
            DbError::Fatal(_) => "fatal_error",
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => DbError::DoesNotExist,
            sqlx::Error::Database(db) => {
                let kind = match db.code().as_deref() {
                    Some("23505") => IntegrityKind::Unique,
                    Some("23503") => IntegrityKind::ForeignKey,
                    Some("23514") => IntegrityKind::Check,
                    Some("23502") => IntegrityKind::NotNull,
                    Some("23P01") => IntegrityKind::Exclusion,
                    c => IntegrityKind::Other(c.unwrap_or_default().into()),
                };
                DbError::Integrity {
                    kind,
                    constraint: db.constraint().map(|s| s.to_owned()),
                    source: e,
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DbError::Temporary,
            _ => DbError::Fatal(e),
        }
    }
}

/// Rewrites `?` placeholders into the `$1, $2, ...` form the driver expects.
/// Strings containing `?` are not escaped.
pub(crate) fn number_placeholders(sql: &str) -> String {
    let mut param_index = 1;
    let mut result = String::with_capacity(sql.len());
    for ch in sql.chars() {
        if ch == '?' {
            result.push('$');
            result.push_str(&param_index.to_string());
            param_index += 1;
        } else {
            result.push(ch);
        }
    }
    result
}

pub(crate) async fn execute(pool: &PgPool, sql: &str, args: PgArguments) -> Result<u64, DbError> {
    tracing::debug!(sql, "executing statement");
    let res = sqlx::query_with(sql, args)
        .execute(pool)
        .await
        .map_err(log_failure)?;
    Ok(res.rows_affected())
}

pub(crate) async fn fetch_one<M>(pool: &PgPool, sql: &str, args: PgArguments) -> Result<M, DbError>
where
    M: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql, "fetching row");
    sqlx::query_as_with(sql, args)
        .fetch_one(pool)
        .await
        .map_err(log_failure)
}

pub(crate) async fn fetch_all<M>(
    pool: &PgPool,
    sql: &str,
    args: PgArguments,
) -> Result<Vec<M>, DbError>
where
    M: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql, "fetching rows");
    sqlx::query_as_with(sql, args)
        .fetch_all(pool)
        .await
        .map_err(log_failure)
}

pub(crate) async fn fetch_optional<M>(
    pool: &PgPool,
    sql: &str,
    args: PgArguments,
) -> Result<Option<M>, DbError>
where
    M: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql, "fetching optional row");
    sqlx::query_as_with(sql, args)
        .fetch_optional(pool)
        .await
        .map_err(log_failure)
}

pub(crate) async fn fetch_scalar<T>(
    pool: &PgPool,
    sql: &str,
    args: PgArguments,
) -> Result<T, DbError>
where
    for<'d> T: sqlx::Decode<'d, Postgres> + sqlx::Type<Postgres> + Send + Unpin,
{
    tracing::debug!(sql, "fetching scalar");
    sqlx::query_scalar_with(sql, args)
        .fetch_one(pool)
        .await
        .map_err(log_failure)
}

fn log_failure(e: sqlx::Error) -> DbError {
    let err = DbError::from(e);
    tracing::error!(code = err.code(), "statement failed");
    err
}

#[cfg(test)]
mod tests {
    use super::number_placeholders;

    #[test]
    fn placeholders_are_numbered_in_order() {
        assert_eq!(
            number_placeholders("SELECT * FROM t WHERE a = ? AND b = ?"),
            "SELECT * FROM t WHERE a = $1 AND b = $2"
        );
        assert_eq!(number_placeholders("no params"), "no params");
    }
}
