//! Catalog business logic and the service that exposes it to internal callers.

mod manager;
mod service;

pub use manager::CatalogManager;
pub use service::CatalogService;
