use axum::{routing::get, Router};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Plain-text landing route at `/`, outside the API-key gate
pub fn router() -> Router {
    Router::new().route("/", get(welcome))
}
