//! API routes module

pub mod health;
pub mod products;
pub mod welcome;

use axum::Router;

use crate::state::AppState;

/// Create all API routes (nested under `/api` by `create_router`)
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
