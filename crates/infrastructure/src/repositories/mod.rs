pub mod sqlite_item_repository;
pub mod sqlite_order_repository;
pub mod sqlite_report_repository;
pub mod sqlite_storage;
pub mod sqlite_user_repository;

pub use sqlite_storage::{SqliteSession, SqliteStorage};
