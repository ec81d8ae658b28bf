use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use std::time::Duration;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const BOOTSTRAP_SQL: &str = include_str!("bootstrap.sql");

#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_size: u32,
    pub busy_timeout_ms: u32,
    pub connection_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 8,
            busy_timeout_ms: 5000,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Per-connection SQLite settings. Foreign keys are off by default in
/// SQLite and must be enabled on every connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a pooled SQLite database handle
    pub fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = r2d2::Pool::builder()
            .max_size(settings.max_size)
            .connection_timeout(settings.connection_timeout)
            .connection_customizer(Box::new(ConnectionPragmas {
                busy_timeout_ms: settings.busy_timeout_ms,
            }))
            .build(manager)
            .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?;
        Ok(Database { pool })
    }

    /// Create the catalog tables if they do not exist yet.
    pub fn initialize(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?;
        conn.batch_execute(BOOTSTRAP_SQL)
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        info!("database schema ready");
        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
