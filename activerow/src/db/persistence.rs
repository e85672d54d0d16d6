use std::marker::PhantomData;

use crate::db::executor::{self, number_placeholders};
use crate::db::interfaces::{
    Bindable, DomainModel, primary_column, selectable_columns, writable_columns,
};
use crate::db::value::SqlValue;
use crate::db::{Database, DbError, PgArguments, PgRow, Table};
use crate::validation::Validate;

/// Builds one persistence handle per call; the generated
/// `create_persistence` members go through here.
pub struct PersistenceFactory;

impl PersistenceFactory {
    pub fn new() -> Self {
        PersistenceFactory
    }

    pub fn create_persistence<M: DomainModel>(&self) -> Persistence<M> {
        Persistence::new()
    }
}

impl Default for PersistenceFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Write-side entry points for one expanded type. Statements are composed
/// from the type's schema; predicates passed in are caller-trusted SQL.
pub struct Persistence<M> {
    _marker: PhantomData<M>,
}

impl<M> Persistence<M> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M> Default for Persistence<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Persistence<M>
where
    M: DomainModel + Bindable + Validate + for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    /// Inserts unsaved records, updates saved ones (key present).
    pub async fn save(&self, instance: &M, skip_validation: bool) -> Result<(), DbError> {
        if !skip_validation {
            Table::validate(instance, false)?;
        }
        match instance.primary_token() {
            None => {
                self.insert_unchecked(instance).await?;
                Ok(())
            }
            Some(token) => {
                let affected = self.update_row(instance, token).await?;
                if affected == 0 {
                    Err(DbError::DoesNotExist)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Inserts one record and returns its stored form, key included.
    pub async fn insert(&self, dirty_object: &M, skip_validation: bool) -> Result<M, DbError> {
        if !skip_validation {
            Table::validate(dirty_object, false)?;
        }
        self.insert_unchecked(dirty_object).await
    }

    /// Inserts each record in order; one result code per input element.
    pub async fn insert_many(
        &self,
        dirty_objects: &[M],
        skip_validation: bool,
    ) -> Result<Vec<u64>, DbError> {
        if !skip_validation {
            for dirty_object in dirty_objects {
                Table::validate(dirty_object, false)?;
            }
        }
        let sql = number_placeholders(&insert_statement::<M>(false));
        let mut results = Vec::with_capacity(dirty_objects.len());
        for dirty_object in dirty_objects {
            let mut args = PgArguments::default();
            dirty_object.bind_values(&mut args).map_err(DbError::from)?;
            let affected = executor::execute(Database::pool()?, &sql, args).await?;
            results.push(affected);
        }
        Ok(results)
    }

    pub async fn update_by_id(
        &self,
        id: impl Into<SqlValue>,
        dirty_object: &M,
        skip_validation: bool,
    ) -> Result<u64, DbError> {
        if !skip_validation {
            Table::validate(dirty_object, false)?;
        }
        self.update_row(dirty_object, id.into()).await
    }

    /// Both fragments are plain SQL text; nothing is bound or escaped.
    pub async fn update_where(&self, updates: &str, predicate: &str) -> Result<u64, DbError> {
        let mut sql = format!("UPDATE {} SET {}", M::table_name(), updates);
        if !predicate.trim().is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        executor::execute(Database::pool()?, &sql, PgArguments::default()).await
    }

    pub async fn delete_by_id(&self, id: impl Into<SqlValue>) -> Result<u64, DbError> {
        let key = primary_column(M::schema()).ok_or(DbError::BadQuery)?;
        let sql = number_placeholders(&format!(
            "DELETE FROM {} WHERE {} = ?",
            M::table_name(),
            key
        ));
        let mut args = PgArguments::default();
        id.into()
            .bind_onto(&mut args)
            .map_err(|e| DbError::Bind(e.to_string()))?;
        executor::execute(Database::pool()?, &sql, args).await
    }

    pub async fn delete_where(&self, predicate: &str) -> Result<u64, DbError> {
        let mut sql = format!("DELETE FROM {}", M::table_name());
        if !predicate.trim().is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        executor::execute(Database::pool()?, &sql, PgArguments::default()).await
    }

    async fn insert_unchecked(&self, instance: &M) -> Result<M, DbError> {
        let sql = number_placeholders(&insert_statement::<M>(true));
        let mut args = PgArguments::default();
        instance.bind_values(&mut args).map_err(DbError::from)?;
        executor::fetch_one(Database::pool()?, &sql, args).await
    }

    async fn update_row(&self, instance: &M, key_token: SqlValue) -> Result<u64, DbError> {
        let sql = number_placeholders(&update_statement::<M>()?);
        let mut args = PgArguments::default();
        instance.bind_values(&mut args).map_err(DbError::from)?;
        key_token
            .bind_onto(&mut args)
            .map_err(|e| DbError::Bind(e.to_string()))?;
        executor::execute(Database::pool()?, &sql, args).await
    }
}

fn insert_statement<M: DomainModel>(returning: bool) -> String {
    let mut sql = format!("INSERT INTO {} (", M::table_name());
    let columns: Vec<&str> = writable_columns(M::schema()).collect();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(column);
    }
    sql.push_str(") VALUES (");
    for i in 0..columns.len() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('?');
    }
    sql.push(')');
    if returning {
        sql.push_str(" RETURNING ");
        for (i, column) in selectable_columns(M::schema()).enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
        }
    }
    sql
}

fn update_statement<M: DomainModel>() -> Result<String, DbError> {
    let key = primary_column(M::schema()).ok_or(DbError::BadQuery)?;
    let mut sql = format!("UPDATE {} SET ", M::table_name());
    for (i, column) in writable_columns(M::schema()).enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(column);
        sql.push_str(" = ?");
    }
    sql.push_str(" WHERE ");
    sql.push_str(key);
    sql.push_str(" = ?");
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::{insert_statement, update_statement};
    use crate::db::interfaces::{ColumnSpec, DomainModel};
    use crate::db::value::SqlValue;

    struct Member;

    impl DomainModel for Member {
        fn table_name() -> &'static str {
            "members"
        }

        fn schema() -> &'static [ColumnSpec] {
            &[
                ColumnSpec {
                    name: "name",
                    column: "member_name",
                    primary_key: false,
                },
                ColumnSpec {
                    name: "age",
                    column: "age",
                    primary_key: false,
                },
                ColumnSpec {
                    name: "id",
                    column: "id",
                    primary_key: true,
                },
            ]
        }

        fn primary_token(&self) -> Option<SqlValue> {
            None
        }
    }

    #[test]
    fn insert_skips_the_key_and_returns_all_columns() {
        assert_eq!(
            insert_statement::<Member>(true),
            "INSERT INTO members (member_name, age) VALUES (?, ?) RETURNING member_name, age, id"
        );
        assert_eq!(
            insert_statement::<Member>(false),
            "INSERT INTO members (member_name, age) VALUES (?, ?)"
        );
    }

    #[test]
    fn update_sets_writable_columns_and_filters_on_the_key() {
        assert_eq!(
            update_statement::<Member>().unwrap(),
            "UPDATE members SET member_name = ?, age = ? WHERE id = ?"
        );
    }
}
