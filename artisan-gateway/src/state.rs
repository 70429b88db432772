//! Shared handler state.
//!
//! Built once at startup and cloned into every request. The store is
//! optional: without one, store-backed endpoints fail and diagnostics
//! report the store as unavailable.

use std::sync::Arc;

use artisan_store::{DocumentStore, StoreError};

use crate::{config::Config, forward::Forwarder};

/// Handles shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn DocumentStore>>,
    forwarder: Arc<Forwarder>,
    config: Arc<Config>,
}

impl AppState {
    /// Assemble state from already-constructed parts.
    #[must_use]
    pub fn new(store: Option<Arc<dyn DocumentStore>>, forwarder: Forwarder, config: Config) -> Self {
        Self { store, forwarder: Arc::new(forwarder), config: Arc::new(config) }
    }

    /// The document store.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if no store is configured.
    pub fn store(&self) -> Result<&dyn DocumentStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }

    #[must_use]
    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
