use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as QueryError};
use diesel::sql_types::Integer;
use domain::{
    DomainError, ItemRepository, OrderRepository, ReportRepository, Storage, StorageSession,
    UserRepository,
};

use crate::database::SqlitePool;

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Hands out one pooled connection per request.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn acquire(&self) -> Result<Box<dyn StorageSession>, DomainError> {
        let pool = self.pool.clone();
        let conn = tokio::task::spawn_blocking(move || pool.get())
            .await
            .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?
            .map_err(|e| DomainError::StorageUnavailable(e.to_string()))?;

        Ok(Box::new(SqliteSession { conn: Some(conn) }))
    }
}

/// A request-scoped connection. Dropping the session returns the
/// connection to the pool.
pub struct SqliteSession {
    conn: Option<PooledSqlite>,
}

impl SqliteSession {
    /// Runs a blocking diesel query on the blocking pool, lending it this
    /// session's connection for the duration of the call.
    pub(crate) async fn run<T, F>(&mut self, query: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut conn = self
            .conn
            .take()
            .ok_or_else(|| DomainError::Repository("connection lost by an earlier query".to_string()))?;

        let (conn, result) = tokio::task::spawn_blocking(move || {
            let result = query(&mut *conn);
            (conn, result)
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        self.conn = Some(conn);
        result.map_err(map_query_error)
    }
}

impl StorageSession for SqliteSession {
    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn items(&mut self) -> &mut dyn ItemRepository {
        self
    }

    fn orders(&mut self) -> &mut dyn OrderRepository {
        self
    }

    fn reports(&mut self) -> &mut dyn ReportRepository {
        self
    }
}

#[derive(QueryableByName)]
struct LastInsertId {
    #[diesel(sql_type = Integer)]
    id: i32,
}

/// Primary key generated by the last insert on this connection.
pub(crate) fn last_insert_id(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertId>(conn)
        .map(|row| row.id)
}

pub(crate) fn map_query_error(err: QueryError) -> DomainError {
    match err {
        QueryError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DomainError::Conflict(conflict_message(info.message()))
        }
        // The referenced row vanished between the existence check and the write.
        QueryError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DomainError::not_found("Referenced row not found")
        }
        other => DomainError::Repository(other.to_string()),
    }
}

/// SQLite reports `UNIQUE constraint failed: users.email`.
fn conflict_message(message: &str) -> String {
    let target = message.rsplit(": ").next().unwrap_or(message);
    let target = target.split(',').next().unwrap_or(target).trim();
    let (table, column) = target.split_once('.').unwrap_or(("", target));
    let entity = match table {
        "users" => "user",
        "items" => "item",
        "orders" => "order",
        _ => "record",
    };
    let key = match column {
        "username" => "UserName",
        "email" => "email",
        "national_id" => "NationalID",
        other => other,
    };
    format!("A {entity} with this {key} already exists")
}
