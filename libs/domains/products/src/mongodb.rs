//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::query::ProductFilter;
use crate::repository::ProductRepository;

pub const DEFAULT_COLLECTION: &str = "products";

/// Stored shape: `_id` holds the UUID string, timestamps are BSON dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn default_in_stock() -> bool {
    true
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            in_stock: product.in_stock,
            created_at: to_bson_datetime(product.created_at),
            updated_at: to_bson_datetime(product.updated_at),
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id).map_err(|e| {
            ProductError::Database(format!("stored product id '{}' is not a UUID: {e}", document.id))
        })?;

        Ok(Product {
            id,
            name: document.name,
            description: document.description,
            price: document.price,
            category: document.category,
            in_stock: document.in_stock,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
        })
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

fn update_document(input: &UpdateProduct) -> Document {
    let mut set = doc! { "updatedAt": bson::DateTime::now() };

    if let Some(ref name) = input.name {
        set.insert("name", name.as_str());
    }
    if let Some(ref description) = input.description {
        set.insert("description", description.as_str());
    }
    if let Some(price) = input.price {
        set.insert("price", price);
    }
    if let Some(ref category) = input.category {
        set.insert("category", category.as_str());
    }
    if let Some(in_stock) = input.in_stock {
        set.insert("inStock", in_stock);
    }

    doc! { "$set": set }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Indexes backing the default sort and the category filter
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection
            .insert_one(ProductDocument::from(&product))
            .await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(Product::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        skip: i64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let skip = u64::try_from(skip).map_err(|_| {
            ProductError::Database(format!("skip must be a non-negative number, got {skip}"))
        })?;

        let options = FindOptions::builder()
            .skip(skip)
            .limit(limit)
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .collection
            .find(filter.to_document())
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(filter.to_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let document = self
            .collection
            .find_one_and_update(id_filter(id), update_document(&input))
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ProductError::NotFound)?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Product::try_from(document)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        let document = self
            .collection
            .find_one_and_delete(id_filter(id))
            .await?
            .ok_or(ProductError::NotFound)?;

        tracing::info!(product_id = %id, "Product deleted successfully");
        Product::try_from(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new(CreateProduct {
            name: "Pen".to_string(),
            description: "Blue ink".to_string(),
            price: 1.5,
            category: "office".to_string(),
            in_stock: true,
        })
    }

    #[test]
    fn test_document_round_trip_keeps_millisecond_precision() {
        let product = product();
        let restored = Product::try_from(ProductDocument::from(&product)).unwrap();

        assert_eq!(restored.id, product.id);
        assert_eq!(restored.name, product.name);
        assert_eq!(
            restored.created_at.timestamp_millis(),
            product.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_stored_shape_uses_id_and_camel_case() {
        let document = bson::to_document(&ProductDocument::from(&product())).unwrap();

        assert!(document.get_str("_id").is_ok());
        assert!(document.get_bool("inStock").unwrap());
        assert!(document.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn test_missing_in_stock_defaults_to_true() {
        let document = doc! {
            "_id": Uuid::now_v7().to_string(),
            "name": "Pen",
            "description": "Blue ink",
            "price": 1.5,
            "category": "office",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };
        let stored: ProductDocument = bson::from_document(document).unwrap();
        assert!(stored.in_stock);
    }

    #[test]
    fn test_non_uuid_id_is_a_storage_error() {
        let mut stored = ProductDocument::from(&product());
        stored.id = "507f1f77bcf86cd799439011".to_string();
        assert!(matches!(
            Product::try_from(stored),
            Err(ProductError::Database(_))
        ));
    }

    #[test]
    fn test_update_document_sets_only_present_fields() {
        let update = update_document(&UpdateProduct {
            price: Some(3.0),
            ..Default::default()
        });
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_f64("price").unwrap(), 3.0);
        assert!(set.get_datetime("updatedAt").is_ok());
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("_id"));
    }
}
