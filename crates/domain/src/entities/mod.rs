pub mod item;
pub mod order;
pub mod summary;
pub mod user;

pub use item::*;
pub use order::*;
pub use summary::*;
pub use user::*;
