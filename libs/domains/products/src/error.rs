use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A value passed payload validation but broke a schema constraint.
    #[error("{0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Storage faults on create/update are reported to the caller as bad input.
    pub fn on_write_path(self) -> Self {
        match self {
            ProductError::Database(msg) => ProductError::Constraint(msg),
            other => other,
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => AppError::NotFound(PRODUCT_NOT_FOUND.to_string()),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::Constraint(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Constraint(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_write_path_turns_storage_fault_into_bad_request() {
        let err = ProductError::Database("duplicate key".into()).on_write_path();
        assert_eq!(err, ProductError::Constraint("duplicate key".into()));
        assert_eq!(
            AppError::from(err).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_write_path_keeps_not_found() {
        assert_eq!(ProductError::NotFound.on_write_path(), ProductError::NotFound);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ProductError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ProductError::Validation(vec!["x".into()])).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ProductError::Database("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
