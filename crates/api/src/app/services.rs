use roster_store::RegistryStore;

/// Shared state injected into every handler via `Extension<Arc<AppServices>>`.
#[derive(Debug, Clone)]
pub struct AppServices {
    store: RegistryStore,
}

impl AppServices {
    pub fn new(store: RegistryStore) -> Self {
        Self { store }
    }

    /// Registry database handle.
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }
}
