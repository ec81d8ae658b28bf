use crate::entities::{NewUser, User, UserChanges};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait UserRepository: Send {
    async fn find_all(&mut self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&mut self, id: i32) -> Result<Option<User>, DomainError>;
    async fn exists(&mut self, id: i32) -> Result<bool, DomainError>;
    /// Returns the generated primary key.
    async fn insert(&mut self, user: &NewUser) -> Result<i32, DomainError>;
    /// Returns the number of rows the storage reports as affected.
    async fn update(&mut self, id: i32, changes: &UserChanges) -> Result<usize, DomainError>;
    async fn delete(&mut self, id: i32) -> Result<usize, DomainError>;
}
