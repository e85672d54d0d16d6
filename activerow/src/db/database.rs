use once_cell::sync::OnceCell;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::db::DbError;

static POOL: OnceCell<PgPool> = OnceCell::new();

/// Process-global connection registry. Generated call sites obtain their
/// handles through here; nothing else holds a connection.
pub struct Database;

impl Database {
    /// First install wins; later installs are ignored so tests and embedded
    /// setups can call this unconditionally.
    pub fn install(pool: PgPool) {
        let _ = POOL.set(pool);
    }

    pub async fn connect(url: &str) -> Result<(), DbError> {
        let pool = PgPoolOptions::new()
            .connect(url)
            .await
            .map_err(DbError::from)?;
        Self::install(pool);
        Ok(())
    }

    /// Reads `DATABASE_URL`, consulting a `.env` file when present.
    pub async fn connect_from_env() -> Result<(), DbError> {
        let url = dotenvy::var("DATABASE_URL").map_err(|_| DbError::NotConfigured)?;
        Self::connect(&url).await
    }

    pub fn pool() -> Result<&'static PgPool, DbError> {
        POOL.get().ok_or(DbError::NotConfigured)
    }
}
