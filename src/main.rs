mod app_system;
mod catalog_actor;
mod clients;
mod domain;
mod error;
mod messages;
mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, CatalogConfig, CatalogSystem};
use crate::domain::{Pagination, ProductCreate, ProductPatch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = CatalogConfig::from_env()?;
    info!(backend = ?config.backend, "Starting product catalog");

    // The store is connected before any request can reach the service.
    let system = CatalogSystem::start(&config).await?;

    if std::env::args().any(|arg| arg == "--demo") {
        let span = tracing::info_span!("demo");
        if let Err(e) = run_demo(&system).instrument(span).await {
            error!(error = %e, "Demo failed");
        }
    } else {
        info!("Catalog service ready, press Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;
    }

    system.shutdown().await?;
    info!("Product catalog stopped");
    Ok(())
}

async fn run_demo(system: &CatalogSystem) -> Result<(), crate::error::CatalogError> {
    let client = &system.catalog_client;

    let widget = client
        .create_product(ProductCreate::new("Widget", 9.99).with_description("demo item"))
        .await?;
    info!(product_id = widget.id, "Created demo product");

    let patch = ProductPatch {
        price: Some(12.5),
        ..Default::default()
    };
    let widget = client.update_product(widget.id, patch).await?;
    info!(price = widget.price, "Updated demo product");

    let page = client.find_all_products(Pagination::new(1, 10)).await?;
    info!(total = page.metadata.total, last_page = page.metadata.last_page, "Listed products");

    let removed = client.remove_product(widget.id).await?;
    info!(available = removed.available, "Removed demo product");

    if let Err(e) = client.find_product(widget.id).await {
        if let Some(payload) = e.rpc_payload() {
            info!(payload = %serde_json::to_string(&payload).unwrap_or_default(), "Lookup after removal rejected");
        }
    }

    Ok(())
}
