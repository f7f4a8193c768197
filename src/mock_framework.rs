//! # Mock Framework
//!
//! Utilities for testing code that talks to the catalog through a
//! [`CatalogClient`] without running a real service.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! channel, then pull requests off with helpers like [`expect_find_one`] and
//! answer them by hand.

use tokio::sync::mpsc;

use crate::clients::CatalogClient;
use crate::domain::{Page, Pagination, Product, ProductCreate, ProductPatch};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

pub async fn expect_create(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductCreate, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Create { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

pub async fn expect_find_all(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(Pagination, ServiceResponse<Page<Product>, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::FindAll {
            pagination,
            respond_to,
        }) => Some((pagination, respond_to)),
        _ => None,
    }
}

pub async fn expect_find_one(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(i64, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::FindOne { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_update(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(i64, ProductPatch, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(i64, ServiceResponse<Product, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Remove { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_shutdown(receiver: &mut mpsc::Receiver<CatalogRequest>) -> bool {
    matches!(receiver.recv().await, Some(CatalogRequest::Shutdown))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::PageMetadata;

    fn product(id: i64, name: &str) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: 9.99,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client.create_product(ProductCreate::new("Widget", 9.99)).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Widget");
        responder.send(Ok(product(1, "Widget"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_mock_client_forwards_not_found() {
        let (client, mut receiver) = create_mock_client(10);

        let find_task = tokio::spawn(async move { client.find_product(9999).await });

        let (id, responder) = expect_find_one(&mut receiver).await.expect("Expected FindOne request");
        assert_eq!(id, 9999);
        responder.send(Err(CatalogError::not_found(id))).unwrap();

        let err = find_task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Product with id: #9999 not found");
    }

    #[tokio::test]
    async fn test_mock_client_passes_patch_through() {
        let (client, mut receiver) = create_mock_client(10);

        let update_task = tokio::spawn(async move {
            let patch = ProductPatch {
                id: Some(2),
                name: Some("X".to_string()),
                ..Default::default()
            };
            client.update_product(1, patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, 1);
        assert_eq!(patch.id, Some(2));
        responder.send(Ok(product(1, "X"))).unwrap();

        assert_eq!(update_task.await.unwrap().unwrap().name, "X");
    }

    #[tokio::test]
    async fn test_mock_client_find_all_and_remove() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move {
            let page = client.find_all_products(Pagination::default()).await?;
            let removed = client.remove_product(page.data[0].id).await?;
            client.shutdown().await?;
            Ok::<_, CatalogError>(removed)
        });

        let (pagination, responder) = expect_find_all(&mut receiver).await.expect("Expected FindAll request");
        assert_eq!(pagination, Pagination::new(1, 10));
        responder
            .send(Ok(Page {
                data: vec![product(3, "Widget")],
                metadata: PageMetadata {
                    total: 1,
                    page: 1,
                    last_page: 1,
                },
            }))
            .unwrap();

        let (id, responder) = expect_remove(&mut receiver).await.expect("Expected Remove request");
        assert_eq!(id, 3);
        let mut removed = product(3, "Widget");
        removed.available = false;
        responder.send(Ok(removed)).unwrap();

        assert!(expect_shutdown(&mut receiver).await);
        assert!(!task.await.unwrap().unwrap().available);
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let find_task = tokio::spawn(async move { client.find_product(1).await });
        let (_, responder) = expect_find_one(&mut receiver).await.expect("Expected FindOne request");
        drop(responder);

        let err = find_task.await.unwrap().unwrap_err();
        assert!(matches!(err, CatalogError::ActorCommunicationError(_)));
    }
}
