use crate::entities::{NewOrder, OrderChanges, OrderListing};
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait OrderRepository: Send {
    async fn find_all(&mut self) -> Result<Vec<OrderListing>, DomainError>;
    async fn find_by_id(&mut self, id: i32) -> Result<Option<OrderListing>, DomainError>;
    async fn insert(&mut self, order: &NewOrder) -> Result<i32, DomainError>;
    async fn update(&mut self, id: i32, changes: &OrderChanges) -> Result<usize, DomainError>;
    async fn delete(&mut self, id: i32) -> Result<usize, DomainError>;
}
