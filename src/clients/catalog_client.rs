use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{Page, Pagination, Product, ProductCreate, ProductPatch};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the catalog service. Clones share the same channel.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CatalogClient => fn create_product(product: ProductCreate) -> Product as CatalogRequest::Create, Error = CatalogError);
client_method!(CatalogClient => fn find_all_products(pagination: Pagination) -> Page<Product> as CatalogRequest::FindAll, Error = CatalogError);
client_method!(CatalogClient => fn update_product(id: i64, patch: ProductPatch) -> Product as CatalogRequest::Update, Error = CatalogError);
client_method!(CatalogClient => fn remove_product(id: i64) -> Product as CatalogRequest::Remove, Error = CatalogError);
client_method!(CatalogClient => fn find_product(id: i64) -> Product as CatalogRequest::FindOne, Error = CatalogError);
