//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::store::RowStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    /// Built once at startup; read-only afterwards.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>, config: AppConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }
}
