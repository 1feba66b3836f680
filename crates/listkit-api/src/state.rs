//! Application state.

use std::sync::Arc;

use listkit_export::{ChannelRegistry, ExportService, HttpImageFetcher};
use listkit_store::MemoryStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub service: Arc<ExportService>,
    pub registry: Arc<ChannelRegistry>,
}

impl AppState {
    /// Create application state backed by the in-memory store.
    ///
    /// Production deployments construct the service with their own store
    /// implementations via [`AppState::with_service`]; the in-memory store
    /// serves tests and local development.
    pub async fn new(config: ApiConfig) -> Self {
        let registry = ChannelRegistry::standard();
        let store = MemoryStore::new();
        store.seed_channels(registry.channels().to_vec()).await;

        let shared = Arc::new(store);
        let fetcher = Arc::new(HttpImageFetcher::with_timeout(config.image_fetch_timeout));
        let service = ExportService::new(
            shared.clone(),
            shared.clone(),
            shared.clone(),
            shared,
            fetcher,
        );

        Self {
            config,
            service: Arc::new(service),
            registry: Arc::new(registry),
        }
    }

    /// Create application state around an existing export service.
    pub fn with_service(config: ApiConfig, service: Arc<ExportService>) -> Self {
        Self {
            config,
            service,
            registry: Arc::new(ChannelRegistry::standard()),
        }
    }
}
