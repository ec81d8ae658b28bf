use crate::errors::DomainError;
use crate::repositories::{ItemRepository, OrderRepository, ReportRepository, UserRepository};
use async_trait::async_trait;

/// Connection factory injected into the dispatcher.
///
/// `acquire` is called once per request. The returned session owns its
/// connection and hands it back to the pool when dropped, so every exit
/// path of a request releases it.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn StorageSession>, DomainError>;
}

/// One request's view of storage. All repositories share the session's
/// connection.
pub trait StorageSession: Send {
    fn users(&mut self) -> &mut dyn UserRepository;
    fn items(&mut self) -> &mut dyn ItemRepository;
    fn orders(&mut self) -> &mut dyn OrderRepository;
    fn reports(&mut self) -> &mut dyn ReportRepository;
}
