//! JSON extractor that turns a raw payload into a checked domain type.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Conversion from a loosely typed request payload into a checked value.
///
/// `Payload` is what the body deserializes into; it should accept anything
/// structurally JSON-shaped so that wrong field types surface as
/// validation messages instead of deserialization failures.
pub trait ValidatePayload: Sized {
    type Payload: DeserializeOwned;

    /// Either the checked value or every violation found, in field order.
    fn validate_payload(payload: Self::Payload) -> Result<Self, Vec<String>>;
}

/// JSON extractor with validation.
///
/// Rejects with [`AppError::JsonExtractorRejection`] when the body is not JSON
/// and with [`AppError::Validation`] when [`ValidatePayload`] reports errors.
/// A body that is JSON but not an object (`[]`, `5`, `"x"`, `null`) carries
/// no fields and is read as `{}`.
///
/// # Example
/// ```ignore
/// use axum_helpers::{ValidatePayload, ValidatedJson};
///
/// struct Rename(String);
///
/// impl ValidatePayload for Rename {
///     type Payload = serde_json::Value;
///
///     fn validate_payload(payload: serde_json::Value) -> Result<Self, Vec<String>> {
///         match payload.get("name").and_then(|v| v.as_str()) {
///             Some(name) if !name.trim().is_empty() => Ok(Rename(name.to_string())),
///             _ => Err(vec!["Name must be a non-empty string".to_string()]),
///         }
///     }
/// }
///
/// async fn rename(ValidatedJson(Rename(name)): ValidatedJson<Rename>) -> String {
///     name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidatePayload,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let body = match body {
            Value::Object(_) => body,
            _ => Value::Object(Map::new()),
        };
        let payload = serde_json::from_value::<T::Payload>(body)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        T::validate_payload(payload)
            .map(ValidatedJson)
            .map_err(AppError::Validation)
    }
}
