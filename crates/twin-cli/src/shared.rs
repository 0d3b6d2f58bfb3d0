//! Shared helpers used across CLI commands.
//!
//! Centralises opening the configured store and building the handler, so
//! every command sees the same tools with the same availability.

use std::sync::Arc;

use tracing::{info, warn};

use twin_config::schema::StoreConfig;
use twin_config::{StoreBackend, TwinConfig};
use twin_mcp::McpHandler;
use twin_store::{MemoryTwinStore, TwinStore};
use twin_store_cosmos::{CosmosSettings, CosmosTwinStore};

/// Opens the configured store, or `None` when it cannot be used.
///
/// Failures are logged, not returned: the server still runs and
/// `save_twin_info` reports the store as unavailable. Never retried.
pub async fn open_store(config: &StoreConfig) -> Option<Arc<dyn TwinStore>> {
    match config.backend {
        StoreBackend::Disabled => {
            info!("store disabled by configuration");
            None
        }
        StoreBackend::Memory => {
            info!("using in-memory store");
            Some(Arc::new(MemoryTwinStore::new()))
        }
        StoreBackend::Cosmos => {
            let Some((endpoint, key)) = config.cosmos.credentials() else {
                warn!("COSMOS_ENDPOINT and COSMOS_KEY not set; Twin storage disabled");
                return None;
            };
            let mut settings = CosmosSettings::new(endpoint, key);
            settings.database = config.cosmos.database.clone();
            settings.container = config.cosmos.container.clone();

            match CosmosTwinStore::connect(settings).await {
                Ok(store) => {
                    info!(database = %config.cosmos.database, "Cosmos DB store ready");
                    Some(Arc::new(store))
                }
                Err(e) => {
                    warn!(error = %e, "failed to initialize Cosmos DB; Twin storage disabled");
                    None
                }
            }
        }
    }
}

/// Builds the long-lived handler for the given configuration.
pub async fn build_handler(config: &TwinConfig) -> McpHandler {
    McpHandler::with_store(open_store(&config.store).await)
}
