use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::{CatalogConfig, StoreBackend};
use crate::catalog_actor::{CatalogManager, CatalogService};
use crate::clients::CatalogClient;
use crate::error::CatalogError;
use crate::store::{DynProductStore, InMemoryProductStore, SqliteProductStore};

/// Owns the store connection and the running catalog service.
///
/// The store is connected before the service is spawned, so no request is
/// ever served against an unconnected store. [`CatalogSystem::shutdown`]
/// stops the service first and only then closes the store.
pub struct CatalogSystem {
    pub catalog_client: CatalogClient,
    store: DynProductStore,
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    #[instrument(name = "catalog_system", skip(config), fields(backend = ?config.backend))]
    pub async fn start(config: &CatalogConfig) -> Result<Self, CatalogError> {
        info!("Starting catalog system");

        let store: DynProductStore = match config.backend {
            StoreBackend::Sqlite => Arc::new(
                SqliteProductStore::connect(&config.database_url, config.max_connections).await?,
            ),
            StoreBackend::Memory => Arc::new(InMemoryProductStore::new()),
        };

        let system = Self::with_store(store, config.buffer_size);
        info!("Catalog system started successfully");
        Ok(system)
    }

    /// Starts the service on an already connected store.
    pub fn with_store(store: DynProductStore, buffer_size: usize) -> Self {
        let manager = CatalogManager::new(store.clone());
        let (service, catalog_client) = CatalogService::new(buffer_size.max(1), manager);
        let handles = vec![tokio::spawn(service.run())];

        Self {
            catalog_client,
            store,
            handles,
        }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), CatalogError> {
        info!("Shutting down catalog system");

        let _ = self.catalog_client.shutdown().await;

        let mut failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Service shutdown error");
                failure.get_or_insert_with(|| {
                    CatalogError::ActorCommunicationError(format!("Service task failed: {e}"))
                });
            }
        }

        self.store.close().await;

        match failure {
            Some(e) => Err(e),
            None => {
                info!("Catalog system shutdown complete");
                Ok(())
            }
        }
    }
}
