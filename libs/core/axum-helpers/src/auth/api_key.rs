use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use thiserror::Error;

use super::ApiKeyConfig;
use crate::errors::AppError;

/// Dedicated credential header; takes precedence over `authorization`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Why a request was refused by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiKeyRejection {
    #[error("API key is missing")]
    Missing,
    #[error("Invalid API key")]
    Invalid,
}

impl From<ApiKeyRejection> for AppError {
    fn from(rejection: ApiKeyRejection) -> Self {
        match rejection {
            ApiKeyRejection::Missing => AppError::Unauthorized(rejection.to_string()),
            ApiKeyRejection::Invalid => AppError::Forbidden(rejection.to_string()),
        }
    }
}

/// Holds the configured secret. Cheap to clone into middleware state.
#[derive(Clone)]
pub struct ApiKeyAuth {
    expected: Arc<str>,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self {
            expected: Arc::from(api_key.as_ref()),
        }
    }

    pub fn from_config(config: &ApiKeyConfig) -> Self {
        Self::new(&config.api_key)
    }

    /// Credential supplied by the caller, if any. Empty values count as absent.
    pub fn extract_credential(headers: &HeaderMap) -> Option<&HeaderValue> {
        let non_empty = |name: &str| headers.get(name).filter(|v: &&HeaderValue| !v.is_empty());

        non_empty(API_KEY_HEADER).or_else(|| non_empty(AUTHORIZATION.as_str()))
    }

    pub fn verify(&self, headers: &HeaderMap) -> Result<(), ApiKeyRejection> {
        let credential = Self::extract_credential(headers).ok_or(ApiKeyRejection::Missing)?;

        if credential.as_bytes() == self.expected.as_bytes() {
            Ok(())
        } else {
            Err(ApiKeyRejection::Invalid)
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("expected", &"[REDACTED]")
            .finish()
    }
}
