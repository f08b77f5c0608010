//! Products API routes

use axum::{middleware, Router};
use axum_helpers::{api_key_middleware, ApiKeyAuth};
use domain_products::{handlers, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create products router; every operation sits behind the API-key gate
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    let auth = ApiKeyAuth::from_config(&state.config.api_key);

    handlers::router(service).layer(middleware::from_fn_with_state(auth, api_key_middleware))
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
