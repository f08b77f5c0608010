//! Product Service - orchestrates repository calls

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};
use crate::query::{total_pages, ListProductsQuery};
use crate::repository::ProductRepository;

/// Product service
///
/// Payload validation happens at the HTTP boundary; the service re-checks the
/// schema constraints before every write.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products plus the total matching the same filter.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListProductsQuery) -> ProductResult<ProductPage> {
        let filter = query.filter();

        let data = self
            .repository
            .list(filter.clone(), query.skip(), query.limit)
            .await?;
        let total = self.repository.count(filter).await?;

        Ok(ProductPage {
            count: data.len(),
            total,
            current_page: query.page,
            total_pages: total_pages(total, query.limit),
            data,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// Returns the product as it was just before removal.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ProductFilter;
    use crate::repository::MockProductRepository;
    use mockall::predicate::{always, eq};

    fn pen() -> CreateProduct {
        CreateProduct {
            name: "Pen".to_string(),
            description: "Blue ink".to_string(),
            price: 1.5,
            category: "office".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_list_computes_pagination() {
        let mut mock_repo = MockProductRepository::new();
        let expected_filter = ProductFilter {
            category: Some("office".to_string()),
            search: None,
        };

        mock_repo
            .expect_list()
            .with(eq(expected_filter.clone()), eq(5), eq(5))
            .returning(|_, _, _| Ok(vec![Product::new(pen())]));
        mock_repo
            .expect_count()
            .with(eq(expected_filter))
            .returning(|_| Ok(6));

        let service = ProductService::new(mock_repo);
        let page = service
            .list_products(ListProductsQuery {
                category: Some("office".to_string()),
                search: None,
                page: 2,
                limit: 5,
            })
            .await
            .unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.total, 6);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_propagates_storage_fault() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|_, _, _| Err(ProductError::Database("skip must be non-negative".into())));
        mock_repo.expect_count().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .list_products(ListProductsQuery {
                page: 0,
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.get_product(id).await.unwrap_err(), ProductError::NotFound);
    }

    #[tokio::test]
    async fn test_create_rechecks_schema_constraints() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(CreateProduct {
                price: -1.0,
                ..pen()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_create_delegates_to_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .with(eq(pen()))
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(pen()).await.unwrap();
        assert_eq!(product.name, "Pen");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .with(always(), always())
            .returning(|_, _| Err(ProductError::NotFound));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(
                Uuid::now_v7(),
                UpdateProduct {
                    in_stock: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, ProductError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_product() {
        let mut mock_repo = MockProductRepository::new();
        let removed = Product::new(pen());
        let id = removed.id;
        mock_repo
            .expect_delete()
            .with(eq(id))
            .returning(move |_| Ok(removed.clone()));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.delete_product(id).await.unwrap().id, id);
    }
}
