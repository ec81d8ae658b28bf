use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use domain::{CredentialHasher, DomainError};

/// Argon2id with a fresh random salt per hash, encoded as a PHC string.
/// Hashing runs on tokio's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

fn hash_password(plaintext: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Hashing(e.to_string()))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| DomainError::Hashing(e.to_string()))?
    }
}
