use config::Config;
use domain::{CredentialHasher, DispatchRequest, DispatchResponse, DomainError, ResourceDispatcher, Storage};
use infrastructure::{Argon2CredentialHasher, Database, PoolSettings, SqliteStorage};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Catalog Application - wires the SQLite adapter into the dispatcher
pub struct CatalogApp {
    pub dispatcher: ResourceDispatcher,
}

impl CatalogApp {
    pub fn new_with_config(config: &Config) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::connect(
            &config.database_url,
            PoolSettings {
                max_size: config.db_pool_size,
                busy_timeout_ms: config.db_busy_timeout_ms,
                connection_timeout: Duration::from_secs(config.db_connect_timeout_secs),
            },
        )?;
        database.initialize()?;
        info!(
            "💾 Database {} ready (pool size {})",
            config.database_url, config.db_pool_size
        );

        let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new(database.get_pool().clone()));
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher);

        Ok(Self {
            dispatcher: ResourceDispatcher::new(storage, hasher),
        })
    }

    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResponse {
        self.dispatcher.dispatch(request).await
    }
}
