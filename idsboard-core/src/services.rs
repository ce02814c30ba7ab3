use idsboard_common::IdsConfig;

use crate::store::DocumentStore;

/// Process-wide state handed to every request handler.
#[derive(Clone)]
pub struct Services {
    pub store: DocumentStore,
}

impl Services {
    /// Connects the document store. A store that cannot be reached leaves the
    /// services running in degraded mode rather than failing startup.
    pub async fn new(config: &IdsConfig) -> Self {
        Self::with_store(DocumentStore::connect(config).await)
    }

    pub fn with_store(store: DocumentStore) -> Self {
        Self { store }
    }
}
