//! In-process repository for tests and demos.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::ProductFilter;
use crate::repository::ProductRepository;

/// Laptop, Smartphone and Coffee Maker, newest first.
pub fn sample_products() -> Vec<Product> {
    let samples = [
        ("Laptop", "High-performance laptop with 16GB RAM", 1200.0, "electronics", true),
        ("Smartphone", "Latest model with 128GB storage", 800.0, "electronics", true),
        ("Coffee Maker", "Programmable coffee maker with timer", 50.0, "kitchen", false),
    ];

    let now = Utc::now();
    samples
        .into_iter()
        .zip(0i64..)
        .map(|((name, description, price, category, in_stock), age)| {
            let mut product = Product::new(CreateProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                in_stock,
            });
            product.created_at = now - TimeDelta::minutes(age);
            product.updated_at = product.created_at;
            product
        })
        .collect()
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: RwLock::new(products),
        }
    }

    /// Repository pre-filled with [`sample_products`].
    pub fn seeded() -> Self {
        Self::with_products(sample_products())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: ProductFilter,
        skip: i64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let skip = usize::try_from(skip).map_err(|_| {
            ProductError::Database(format!("skip must be a non-negative number, got {skip}"))
        })?;
        let take = match limit {
            0 => usize::MAX,
            n => usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX),
        };

        let matcher = filter.matcher()?;
        let mut matching: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| matcher.matches(p))
            .cloned()
            .collect();
        // uuid v7 ids grow over time, so they break timestamp ties the same way
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let matcher = filter.matcher()?;
        let products = self.products.read().await;
        Ok(products.values().filter(|p| matcher.matches(p)).count() as u64)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound)?;
        product.apply_update(input);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        self.products
            .write()
            .await
            .remove(&id)
            .ok_or(ProductError::NotFound)
    }
}
