use tokio::sync::oneshot;

use crate::domain::{Page, Pagination, Product, ProductCreate, ProductPatch};
use crate::error::CatalogError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the catalog service. Every variant except
/// `Shutdown` carries a oneshot channel for the reply.
#[derive(Debug)]
pub enum CatalogRequest {
    Create {
        product: ProductCreate,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    FindAll {
        pagination: Pagination,
        respond_to: ServiceResponse<Page<Product>, CatalogError>,
    },
    FindOne {
        id: i64,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    Update {
        id: i64,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    Remove {
        id: i64,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    Shutdown,
}
