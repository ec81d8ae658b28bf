use crate::entities::{ItemChanges, ItemFilter, ItemListing, NewItem};
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait ItemRepository: Send {
    async fn find_all(&mut self, filter: &ItemFilter) -> Result<Vec<ItemListing>, DomainError>;
    async fn find_by_id(&mut self, id: i32) -> Result<Option<ItemListing>, DomainError>;
    async fn exists(&mut self, id: i32) -> Result<bool, DomainError>;
    async fn insert(&mut self, item: &NewItem) -> Result<i32, DomainError>;
    async fn update(&mut self, id: i32, changes: &ItemChanges) -> Result<usize, DomainError>;
    async fn delete(&mut self, id: i32) -> Result<usize, DomainError>;
}
