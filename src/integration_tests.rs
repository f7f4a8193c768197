#[cfg(test)]
mod tests {
    use crate::app_system::{CatalogConfig, CatalogSystem};
    use crate::domain::{Pagination, ProductCreate, ProductPatch};
    use crate::error::CatalogError;

    async fn systems() -> Vec<CatalogSystem> {
        vec![
            CatalogSystem::start(&CatalogConfig::default()).await.unwrap(),
            CatalogSystem::start(&CatalogConfig::in_memory()).await.unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_widget_lifecycle() {
        for system in systems().await {
            let client = system.catalog_client.clone();

            // 1. Create
            let widget = client
                .create_product(ProductCreate::new("Widget", 9.99))
                .await
                .unwrap();
            assert!(widget.available);
            assert!(widget.id > 0);

            // 2. List
            let page = client.find_all_products(Pagination::new(1, 10)).await.unwrap();
            assert_eq!(page.data, vec![widget.clone()]);
            assert_eq!(page.metadata.total, 1);
            assert_eq!(page.metadata.page, 1);
            assert_eq!(page.metadata.last_page, 1);

            // 3. Remove
            let removed = client.remove_product(widget.id).await.unwrap();
            assert!(!removed.available);
            assert_eq!(removed.id, widget.id);

            // 4. Gone from reads
            let err = client.find_product(widget.id).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Product with id: #{} not found", widget.id)
            );
            let payload = err.rpc_payload().unwrap();
            assert_eq!(payload.status, 400);

            let page = client.find_all_products(Pagination::new(1, 10)).await.unwrap();
            assert!(page.data.is_empty());
            assert_eq!(page.metadata.total, 0);
            assert_eq!(page.metadata.last_page, 0);

            // 5. Second remove fails the same way
            assert!(matches!(
                client.remove_product(widget.id).await,
                Err(CatalogError::NotFound { .. })
            ));

            system.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_find_one_on_empty_store() {
        for system in systems().await {
            let client = system.catalog_client.clone();

            let err = client.find_product(9999).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound { id: 9999 }));

            let page = client.find_all_products(Pagination::default()).await.unwrap();
            assert_eq!(page.metadata.total, 0);

            system.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_unset_fields() {
        for system in systems().await {
            let client = system.catalog_client.clone();

            let original = client
                .create_product(ProductCreate::new("Widget", 9.99).with_description("blue"))
                .await
                .unwrap();

            let patch = ProductPatch {
                id: Some(original.id + 100),
                name: Some("X".to_string()),
                ..Default::default()
            };
            let updated = client.update_product(original.id, patch).await.unwrap();
            assert_eq!(updated.id, original.id);
            assert_eq!(updated.name, "X");
            assert_eq!(updated.price, 9.99);
            assert_eq!(updated.description.as_deref(), Some("blue"));

            let found = client.find_product(original.id).await.unwrap();
            assert_eq!(found.name, "X");

            assert!(matches!(
                client.update_product(original.id + 100, ProductPatch::default()).await,
                Err(CatalogError::NotFound { .. })
            ));

            system.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_paging_over_mixed_availability() {
        for system in systems().await {
            let client = system.catalog_client.clone();

            let mut ids = Vec::new();
            for i in 0..6 {
                let product = client
                    .create_product(ProductCreate::new(format!("P{i}"), f64::from(i)))
                    .await
                    .unwrap();
                ids.push(product.id);
            }
            client.remove_product(ids[0]).await.unwrap();
            client.remove_product(ids[3]).await.unwrap();

            let first = client.find_all_products(Pagination::new(1, 3)).await.unwrap();
            let second = client.find_all_products(Pagination::new(2, 3)).await.unwrap();
            assert_eq!(first.metadata.total, 4);
            assert_eq!(first.metadata.last_page, 2);

            let names: Vec<_> = first
                .data
                .iter()
                .chain(second.data.iter())
                .map(|p| p.name.clone())
                .collect();
            assert_eq!(names, ["P1", "P2", "P4", "P5"]);
            assert!(first.data.iter().chain(second.data.iter()).all(|p| p.available));

            let err = client
                .find_all_products(Pagination::new(1, 0))
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::InvalidPagination(_)));

            system.shutdown().await.unwrap();
        }
    }
}
