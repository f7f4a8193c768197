//! Persistence seam for the catalog.
//!
//! The catalog manager only ever talks to a [`ProductStore`]; which backend
//! sits behind it is decided once at startup by the system coordinator.

mod memory;
mod sqlite;

pub use memory::InMemoryProductStore;
pub use sqlite::SqliteProductStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Product, ProductChanges, ProductCreate};
use crate::error::StoreError;

pub type DynProductStore = Arc<dyn ProductStore>;

/// Query interface over the products table.
///
/// Every `*_available` method filters to `available = true`. Writes address
/// rows by id regardless of availability and report
/// [`StoreError::RowNotFound`] when nothing matched.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn count_available(&self) -> Result<u64, StoreError>;

    /// Available products in store order (ascending id), skipping `offset`.
    async fn find_available_page(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError>;

    async fn find_available(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Inserts a new, available product and returns it with its assigned id.
    async fn insert(&self, product: ProductCreate) -> Result<Product, StoreError>;

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError>;

    /// Sets `available = false` and leaves every other field alone.
    async fn deactivate(&self, id: i64) -> Result<Product, StoreError>;

    /// Releases the underlying connection(s).
    async fn close(&self);
}
