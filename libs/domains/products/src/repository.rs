use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::ProductFilter;

/// Repository trait for Product persistence
///
/// Implementations assign ids and timestamps; callers never supply them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products matching `filter`, newest first.
    ///
    /// A negative `skip` is a storage error. `limit` follows MongoDB
    /// semantics: `0` means unlimited, a negative value is taken by magnitude.
    async fn list(&self, filter: ProductFilter, skip: i64, limit: i64)
        -> ProductResult<Vec<Product>>;

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// Apply a partial update, returning the post-update state.
    ///
    /// Fails with `NotFound` when no product has this id.
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Remove a product, returning its last known state.
    ///
    /// Fails with `NotFound` when no product has this id.
    async fn delete(&self, id: Uuid) -> ProductResult<Product>;
}
