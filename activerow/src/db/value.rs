use sqlx::Arguments;
use sqlx::postgres::PgArguments;

use crate::db::DbError;

/// A dynamically typed statement parameter; the bridge between the loosely
/// typed generated call surface and the driver's typed binding.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Binds as a text-typed NULL; columns of other types need a typed
    /// variant instead.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(uuid::Uuid),
    Timestamp(chrono::DateTime<chrono::Utc>),
    Json(serde_json::Value),
}

impl SqlValue {
    pub fn bind_onto(&self, args: &mut PgArguments) -> Result<(), sqlx::Error> {
        let outcome = match self {
            SqlValue::Null => args.add(Option::<String>::None),
            SqlValue::Bool(v) => args.add(v),
            SqlValue::Int(v) => args.add(v),
            SqlValue::Float(v) => args.add(v),
            SqlValue::Text(v) => args.add(v),
            SqlValue::Uuid(v) => args.add(v),
            SqlValue::Timestamp(v) => args.add(v),
            SqlValue::Json(v) => args.add(v),
        };
        outcome.map_err(sqlx::Error::Encode)
    }
}

pub fn to_arguments(params: &[SqlValue]) -> Result<PgArguments, DbError> {
    let mut args = PgArguments::default();
    for param in params {
        param
            .bind_onto(&mut args)
            .map_err(|e| DbError::Bind(e.to_string()))?;
    }
    Ok(args)
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<uuid::Uuid> for SqlValue {
    fn from(v: uuid::Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for SqlValue {
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        SqlValue::Json(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

/// Builds a `&[SqlValue]` parameter pack in place.
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[$crate::db::SqlValue]
    };
    ($($value:expr),+ $(,)?) => {
        &[$($crate::db::SqlValue::from($value)),+]
    };
}
