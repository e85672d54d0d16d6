use crate::db::value::SqlValue;
use crate::db::{PgArguments, PgRow, SqlxError};

/// One storage column of an expanded type, in declaration order with the key
/// column last.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column: &'static str,
    pub primary_key: bool,
}

/// Ties an expanded type into the runtime: resolved table identifier, column
/// table and the current key value.
///
/// Implemented by `#[domain_model]`.
pub trait DomainModel: Sized {
    fn table_name() -> &'static str;

    fn schema() -> &'static [ColumnSpec];

    /// The key as a bindable value; `None` until the record has been saved.
    fn primary_token(&self) -> Option<SqlValue>;
}

pub trait Scannable: Sized {
    fn scan_row_ordered(row: &PgRow, start_idx: &mut usize) -> Result<Self, SqlxError>;

    fn scan_row(row: &PgRow) -> Result<Self, SqlxError> {
        let mut idx = 0;
        Self::scan_row_ordered(row, &mut idx)
    }
}

pub trait Bindable: DomainModel {
    /// Binds the non-key column values in schema order.
    fn bind_values(&self, args: &mut PgArguments) -> Result<(), SqlxError>;
}

/// An eager-load edge rendered into the FROM source as a LEFT JOIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub table: &'static str,
    pub on: &'static str,
}

impl Relationship {
    pub const fn new(table: &'static str, on: &'static str) -> Self {
        Self { table, on }
    }

    pub(crate) fn join_clause(&self) -> String {
        format!("LEFT JOIN {} ON {}", self.table, self.on)
    }
}

/// Key column of a schema. Expansion always appends one, so a missing entry
/// means the schema was built by hand.
pub(crate) fn primary_column(schema: &[ColumnSpec]) -> Option<&'static str> {
    schema
        .iter()
        .find(|spec| spec.primary_key)
        .map(|spec| spec.column)
}

/// Non-key columns in schema order, matching `Bindable::bind_values`.
pub(crate) fn writable_columns(schema: &[ColumnSpec]) -> impl Iterator<Item = &'static str> + '_ {
    schema
        .iter()
        .filter(|spec| !spec.primary_key)
        .map(|spec| spec.column)
}

/// Every column in schema order, matching `Scannable::scan_row_ordered`.
pub(crate) fn selectable_columns(schema: &[ColumnSpec]) -> impl Iterator<Item = &'static str> + '_ {
    schema.iter().map(|spec| spec.column)
}
