use std::marker::PhantomData;

use crate::db::executor::{self, number_placeholders};
use crate::db::interfaces::{DomainModel, Relationship, selectable_columns};
use crate::db::sql::assemble_select;
use crate::db::value::{SqlValue, to_arguments};
use crate::db::{Database, DbError, PgRow};

/// Builds one query handle per call; the generated `create_query` members go
/// through here.
pub struct QueryFactory;

impl QueryFactory {
    pub fn new() -> Self {
        QueryFactory
    }

    pub fn create_query<M: DomainModel>(&self) -> Query<M> {
        Query::new()
    }
}

impl Default for QueryFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// SELECT builder over an expanded type. Fragments are caller-trusted SQL;
/// `?` placeholders are renumbered for the driver at render time.
pub struct Query<M> {
    projections: Option<String>,
    filter: Option<String>,
    group_by: Option<String>,
    having: Option<String>,
    order_by: Option<String>,
    offset: i64,
    limit: i64,
    relations: Vec<Relationship>,
    params: Vec<SqlValue>,
    _marker: PhantomData<M>,
}

impl<M: DomainModel> Query<M> {
    pub fn new() -> Self {
        Self {
            projections: None,
            filter: None,
            group_by: None,
            having: None,
            order_by: None,
            offset: 0,
            limit: 0,
            relations: Vec::new(),
            params: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Conjoins a predicate; repeated calls chain with AND.
    pub fn where_(mut self, predicate: &str, params: &[SqlValue]) -> Self {
        match &mut self.filter {
            Some(filter) => {
                filter.push_str(" AND ");
                filter.push_str(predicate);
            }
            None => self.filter = Some(predicate.to_string()),
        }
        self.params.extend_from_slice(params);
        self
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn projections(mut self, projections: &str) -> Self {
        self.projections = Some(projections.to_string());
        self
    }

    pub fn group_by(mut self, group_by: &str) -> Self {
        self.group_by = Some(group_by.to_string());
        self
    }

    pub fn having(mut self, having: &str) -> Self {
        self.having = Some(having.to_string());
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "ASC" } else { "DESC" };
        self.order_by = Some(format!("{} {}", column, direction));
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Attaches eager-load edges, rendered as LEFT JOINs on the FROM source.
    pub fn eager(mut self, relations: &[Relationship]) -> Self {
        self.relations.extend_from_slice(relations);
        self
    }

    /// The statement as it will reach the driver.
    pub fn to_sql(&self) -> Result<String, DbError> {
        let projections = match &self.projections {
            Some(projections) => projections.clone(),
            None => self.default_projections(),
        };
        let sql = assemble_select(
            &self.source(),
            Some(&projections),
            self.filter.as_deref(),
            self.group_by.as_deref(),
            self.having.as_deref(),
            self.order_by.as_deref(),
            self.offset,
            self.limit,
        )?;
        Ok(number_placeholders(&sql))
    }

    fn source(&self) -> String {
        if self.relations.is_empty() {
            return M::table_name().to_string();
        }
        let mut source = M::table_name().to_string();
        for relation in &self.relations {
            source.push(' ');
            source.push_str(&relation.join_clause());
        }
        source
    }

    /// Schema columns in scan order, qualified once joins are in play.
    fn default_projections(&self) -> String {
        let table = M::table_name();
        let qualify = !self.relations.is_empty();
        let mut buffer = String::new();
        for (i, column) in selectable_columns(M::schema()).enumerate() {
            if i > 0 {
                buffer.push_str(", ");
            }
            if qualify {
                buffer.push_str(table);
                buffer.push('.');
            }
            buffer.push_str(column);
        }
        buffer
    }

    pub async fn execute(self) -> Result<Vec<M>, DbError>
    where
        M: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.to_sql()?;
        let args = to_arguments(&self.params)?;
        executor::fetch_all(Database::pool()?, &sql, args).await
    }

    pub async fn query_first(self) -> Result<Option<M>, DbError>
    where
        M: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.to_sql()?;
        let args = to_arguments(&self.params)?;
        executor::fetch_optional(Database::pool()?, &sql, args).await
    }
}

impl<M: DomainModel> Default for Query<M> {
    fn default() -> Self {
        Self::new()
    }
}
