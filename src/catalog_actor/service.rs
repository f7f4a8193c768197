use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn, Instrument};

use super::CatalogManager;
use crate::clients::CatalogClient;
use crate::domain::{Page, Pagination, Product, ProductCreate, ProductPatch};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// The catalog endpoint: receives [`CatalogRequest`]s and answers them.
///
/// Each request runs in its own task, so a slow store call does not hold
/// up the requests queued behind it. On shutdown the loop stops accepting
/// work and waits for in-flight requests to finish.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    manager: CatalogManager,
    in_flight: JoinSet<()>,
}

impl CatalogService {
    pub fn new(buffer_size: usize, manager: CatalogManager) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            manager,
            in_flight: JoinSet::new(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            let manager = self.manager.clone();
            match msg {
                CatalogRequest::Create { product, respond_to } => {
                    self.spawn(handle_create(manager, product, respond_to));
                }
                CatalogRequest::FindAll {
                    pagination,
                    respond_to,
                } => {
                    self.spawn(handle_find_all(manager, pagination, respond_to));
                }
                CatalogRequest::FindOne { id, respond_to } => {
                    self.spawn(handle_find_one(manager, id, respond_to));
                }
                CatalogRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    self.spawn(handle_update(manager, id, patch, respond_to));
                }
                CatalogRequest::Remove { id, respond_to } => {
                    self.spawn(handle_remove(manager, id, respond_to));
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
            self.reap_finished();
        }

        while let Some(joined) = self.in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }

        info!("CatalogService stopped");
    }

    fn spawn<F>(&mut self, handler: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight.spawn(handler.in_current_span());
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.in_flight.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }
    }
}

fn log_failure(error: &CatalogError) {
    match error {
        CatalogError::NotFound { .. } | CatalogError::InvalidPagination(_) => {
            warn!(error = %error, "Request rejected");
        }
        CatalogError::Store(_) | CatalogError::ActorCommunicationError(_) => {
            error!(error = %error, "Request failed");
        }
    }
}

#[instrument(fields(product_name = %product.name), skip(manager, product, respond_to))]
async fn handle_create(
    manager: CatalogManager,
    product: ProductCreate,
    respond_to: ServiceResponse<Product, CatalogError>,
) {
    debug!("Processing create request");
    let result = manager.create(product).await;
    if let Err(e) = &result {
        log_failure(e);
    }
    let _ = respond_to.send(result);
}

#[instrument(fields(page = pagination.page, limit = pagination.limit), skip(manager, respond_to))]
async fn handle_find_all(
    manager: CatalogManager,
    pagination: Pagination,
    respond_to: ServiceResponse<Page<Product>, CatalogError>,
) {
    debug!("Processing find_all request");
    let result = manager.find_all(pagination).await;
    match &result {
        Ok(page) => info!(
            total = page.metadata.total,
            returned = page.data.len(),
            "Products listed"
        ),
        Err(e) => log_failure(e),
    }
    let _ = respond_to.send(result);
}

#[instrument(fields(product_id = id), skip(manager, respond_to))]
async fn handle_find_one(
    manager: CatalogManager,
    id: i64,
    respond_to: ServiceResponse<Product, CatalogError>,
) {
    debug!("Processing find_one request");
    let result = manager.find_one(id).await;
    match &result {
        Ok(product) => info!(product_name = %product.name, price = product.price, "Product found"),
        Err(e) => log_failure(e),
    }
    let _ = respond_to.send(result);
}

#[instrument(fields(product_id = id), skip(manager, patch, respond_to))]
async fn handle_update(
    manager: CatalogManager,
    id: i64,
    patch: ProductPatch,
    respond_to: ServiceResponse<Product, CatalogError>,
) {
    debug!("Processing update request");
    let result = manager.update(id, patch).await;
    if let Err(e) = &result {
        log_failure(e);
    }
    let _ = respond_to.send(result);
}

#[instrument(fields(product_id = id), skip(manager, respond_to))]
async fn handle_remove(
    manager: CatalogManager,
    id: i64,
    respond_to: ServiceResponse<Product, CatalogError>,
) {
    debug!("Processing remove request");
    let result = manager.remove(id).await;
    if let Err(e) = &result {
        log_failure(e);
    }
    let _ = respond_to.send(result);
}
