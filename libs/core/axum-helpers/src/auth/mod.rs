//! Static API-key gate.
//!
//! The credential is read from `x-api-key`, falling back to `authorization`,
//! and compared byte-for-byte with the configured secret.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{ApiKeyAuth, ApiKeyConfig, api_key_middleware};
//! use core_config::FromEnv;
//!
//! let auth = ApiKeyAuth::from_config(&ApiKeyConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, api_key_middleware));
//! ```

pub mod api_key;
pub mod config;
pub mod middleware;

pub use api_key::{API_KEY_HEADER, ApiKeyAuth, ApiKeyRejection};
pub use config::ApiKeyConfig;
pub use middleware::api_key_middleware;
