use tracing::{debug, info, instrument};

use crate::domain::{Page, PageMetadata, Pagination, Product, ProductCreate, ProductPatch};
use crate::error::{CatalogError, StoreError};
use crate::store::DynProductStore;

/// Catalog business rules on top of a [`ProductStore`](crate::store::ProductStore).
///
/// Only available products are visible to reads, and removing a product
/// marks it unavailable instead of deleting the row. Cloning is cheap; all
/// clones share the same store handle.
#[derive(Clone)]
pub struct CatalogManager {
    store: DynProductStore,
}

impl CatalogManager {
    pub fn new(store: DynProductStore) -> Self {
        Self { store }
    }

    #[instrument(fields(product_name = %product.name), skip(self, product))]
    pub async fn create(&self, product: ProductCreate) -> Result<Product, CatalogError> {
        let product = self.store.insert(product).await?;
        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self, pagination: Pagination) -> Result<Page<Product>, CatalogError> {
        pagination.validate()?;

        let total = self.store.count_available().await?;
        let last_page = pagination.last_page(total);
        let data = self
            .store
            .find_available_page(pagination.offset(), pagination.limit)
            .await?;

        debug!(total, returned = data.len(), "Listed products");
        Ok(Page {
            data,
            metadata: PageMetadata {
                total,
                page: pagination.page,
                last_page,
            },
        })
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i64) -> Result<Product, CatalogError> {
        self.store
            .find_available(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(id))
    }

    /// Applies a partial update. Any `id` in the patch is discarded.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, CatalogError> {
        self.find_one(id).await?;

        let changes = patch.into_changes();
        let product = self.store.update(id, changes).await.map_err(|e| row_error(id, e))?;
        info!("Product updated");
        Ok(product)
    }

    /// Soft delete: the product stays in the store with `available = false`.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<Product, CatalogError> {
        self.find_one(id).await?;

        let product = self.store.deactivate(id).await.map_err(|e| row_error(id, e))?;
        info!("Product marked unavailable");
        Ok(product)
    }
}

fn row_error(id: i64, error: StoreError) -> CatalogError {
    match error {
        StoreError::RowNotFound(_) => CatalogError::not_found(id),
        other => CatalogError::Store(other),
    }
}
