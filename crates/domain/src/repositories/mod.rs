pub mod item_repository;
pub mod order_repository;
pub mod report_repository;
pub mod storage;
pub mod user_repository;

pub use item_repository::ItemRepository;
pub use order_repository::OrderRepository;
pub use report_repository::ReportRepository;
pub use storage::{Storage, StorageSession};
pub use user_repository::UserRepository;
