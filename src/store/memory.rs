use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::ProductStore;
use crate::domain::{Product, ProductChanges, ProductCreate};
use crate::error::StoreError;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

/// Products kept in process memory. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryProductStore {
    table: RwLock<Table>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    async fn write_row<F>(&self, id: i64, mutate: F) -> Result<Product, StoreError>
    where
        F: FnOnce(&mut Product) + Send,
    {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(StoreError::RowNotFound(id))?;
        mutate(row);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn count_available(&self) -> Result<u64, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|p| p.available).count() as u64)
    }

    async fn find_available_page(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError> {
        let table = self.table.read().await;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(table
            .rows
            .values()
            .filter(|p| p.available)
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_available(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|p| p.available).cloned())
    }

    async fn insert(&self, product: ProductCreate) -> Result<Product, StoreError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let row = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Product, StoreError> {
        self.write_row(id, move |row| changes.apply_to(row)).await
    }

    async fn deactivate(&self, id: i64) -> Result<Product, StoreError> {
        self.write_row(id, |row| row.available = false).await
    }

    async fn close(&self) {
        debug!("In-memory product store closed");
    }
}
