
mod database;
mod executor;
mod interfaces;
mod persistence;
pub mod populate;
mod query;
pub mod sql;
mod table;
mod value;

pub use sqlx::Error as SqlxError;
pub use sqlx::postgres::{PgArguments, PgRow};
pub use sqlx::{Arguments, FromRow, Row};

pub use activerow_macros::domain_model;
pub use database::Database;
pub use executor::{DbError, IntegrityKind};
pub use interfaces::{Bindable, ColumnSpec, DomainModel, Relationship, Scannable};
pub use persistence::{Persistence, PersistenceFactory};
pub use query::{Query, QueryFactory};
pub use sql::{SqlError, assemble_delete, assemble_select, assemble_update};
pub use table::Table;
pub use value::{SqlValue, to_arguments};
