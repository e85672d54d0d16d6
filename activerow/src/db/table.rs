use crate::db::executor::{self, number_placeholders};
use crate::db::interfaces::DomainModel;
use crate::db::sql::assemble_select;
use crate::db::value::{SqlValue, to_arguments};
use crate::db::{Database, DbError, PgRow};
use crate::validation::{Validate, ValidationError, Violation};

/// Statement-level entry points shared by every expanded type; the generated
/// `execute`, `query_by_sql`, `count` and `validate` members land here.
pub struct Table;

impl Table {
    pub async fn execute<M: DomainModel>(sql: &str, params: &[SqlValue]) -> Result<u64, DbError> {
        tracing::debug!(table = M::table_name(), "raw execute");
        let args = to_arguments(params)?;
        executor::execute(Database::pool()?, &number_placeholders(sql), args).await
    }

    pub async fn query_by_sql<M>(sql: &str, params: &[SqlValue]) -> Result<Vec<M>, DbError>
    where
        M: DomainModel + for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(table = M::table_name(), "raw query");
        let args = to_arguments(params)?;
        executor::fetch_all(Database::pool()?, &number_placeholders(sql), args).await
    }

    /// Counts rows matching a predicate fragment; blank counts the table.
    pub async fn count<M: DomainModel>(predicate: &str, params: &[SqlValue]) -> Result<i64, DbError> {
        let filter = (!predicate.trim().is_empty()).then_some(predicate);
        let sql = assemble_select(
            M::table_name(),
            Some("COUNT(*)"),
            filter,
            None,
            None,
            None,
            0,
            0,
        )?;
        let args = to_arguments(params)?;
        executor::fetch_scalar(Database::pool()?, &number_placeholders(&sql), args).await
    }

    /// Runs the type's declared checks. Lenient mode reports without
    /// failing; otherwise any violation is an error.
    pub fn validate<M: Validate>(
        instance: &M,
        lenient: bool,
    ) -> Result<Vec<Violation>, ValidationError> {
        let mut report = Vec::new();
        instance.check(&mut report);
        if !lenient && !report.is_empty() {
            return Err(ValidationError::Invalid(report));
        }
        Ok(report)
    }
}
