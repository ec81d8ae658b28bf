pub mod database;
pub mod hashing;
pub mod repositories;

pub use database::{Database, PoolSettings, SqlitePool};
pub use hashing::Argon2CredentialHasher;
pub use repositories::{SqliteSession, SqliteStorage};
