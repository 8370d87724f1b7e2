//! # Shared Store
//!
//! Thread-safe handle around a [`Store`].
//!
//! Purchases mutate stock, so a whole order runs under a single lock
//! acquisition. Two concurrent orders can never interleave their lines.

use crate::error::{StoreError, StoreResult};
use crate::order::{OrderLine, Receipt};
use crate::product::Product;
use crate::store::Store;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a store shared between threads
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Store>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    /// Run `f` with exclusive access to the store
    pub fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> T) -> StoreResult<T> {
        let mut store = self.lock()?;
        Ok(f(&mut store))
    }

    /// Place an order as one critical section
    pub fn order(&self, lines: &[OrderLine]) -> StoreResult<Receipt> {
        self.lock()?.order(lines)
    }

    /// Snapshot of the active products
    pub fn active_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.lock()?.active_products().into_iter().cloned().collect())
    }

    pub fn total_active_quantity(&self) -> StoreResult<u64> {
        Ok(self.lock()?.total_active_quantity())
    }

    /// Case-insensitive lookup, returning a snapshot of the product
    pub fn lookup(&self, name: &str) -> StoreResult<Product> {
        self.lock()?.lookup(name).cloned()
    }

    pub fn add_product(&self, product: Product) -> StoreResult<bool> {
        Ok(self.lock()?.add_product(product))
    }

    pub fn remove_product(&self, name: &str) -> StoreResult<Option<Product>> {
        Ok(self.lock()?.remove_product(name))
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}
