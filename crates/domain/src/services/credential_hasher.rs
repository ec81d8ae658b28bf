use crate::errors::DomainError;
use async_trait::async_trait;

/// One-way hashing of credential fields before they reach storage.
///
/// Implementations are expected to be CPU-heavy and must not block the
/// calling task.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError>;
}
