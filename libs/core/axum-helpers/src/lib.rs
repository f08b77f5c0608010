//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: static API-key gate for protected routes
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured JSON error responses with error codes
//! - **[`extractors`]**: request extractors (validated JSON payloads)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{ApiKeyAuth, api_key_middleware, create_router, health_router};
//! use core_config::app_info;
//!
//! let protected = Router::new() // domain routes
//!     .layer(axum::middleware::from_fn_with_state(
//!         ApiKeyAuth::new("secret"),
//!         api_key_middleware,
//!     ));
//! let app = create_router::<ApiDoc>(protected)?.merge(health_router(app_info!()));
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{API_KEY_HEADER, ApiKeyAuth, ApiKeyConfig, ApiKeyRejection, api_key_middleware};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ValidatePayload, ValidatedJson};
