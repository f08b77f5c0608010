//! Products Domain
//!
//! CRUD over a single product collection in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Validation  │  ← raw JSON payload → CreateProduct / UpdateProduct
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← pagination, schema-level checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, DTOs, list filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, mongodb::MongoProductRepository, service::ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("products");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(ProductService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::{sample_products, InMemoryProductRepository};
pub use models::{CreateProduct, Product, ProductPage, UpdateProduct};
pub use crate::mongodb::MongoProductRepository;
pub use query::{FilterMatcher, ListProductsQuery, ProductFilter};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use validation::{validate_create, validate_update, ProductPayload};
