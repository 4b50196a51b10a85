use log::info;
use std::sync::{Arc, RwLock};

use super::Catalog;

/// Process-wide catalog holder.
///
/// Readers take an `Arc` snapshot and keep using it for the whole search, so a
/// concurrent `replace` never changes the data under an in-flight call.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog as of now
    pub fn snapshot(&self) -> Arc<Catalog> {
        // The lock only guards a pointer swap, so a poisoned lock still holds a valid Arc
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new catalog. Returns the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        info!("Replacing catalog ({} -> {} ingredients)", guard.len(), next.len());
        std::mem::replace(&mut *guard, next)
    }
}
