use super::ApiKeyAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// API-key middleware.
///
/// Missing credential → 401 `API key is missing`; wrong credential → 403
/// `Invalid API key`. Matching requests pass through untouched.
///
/// # Example
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/api/products", get(list))
///     .layer(axum::middleware::from_fn_with_state(
///         ApiKeyAuth::new("secret"),
///         api_key_middleware,
///     ));
/// ```
pub async fn api_key_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(rejection) = auth.verify(request.headers()) {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            %rejection,
            "Rejected request at API key gate"
        );
        return Err(rejection.into());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/protected", get(|| async { "through" }))
            .layer(axum::middleware::from_fn_with_state(
                ApiKeyAuth::new("secret"),
                api_key_middleware,
            ))
    }

    async fn call(header: Option<(&str, &str)>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().uri("/protected");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_missing_key_returns_401() {
        let (status, body) = call(None).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "API key is missing");
    }

    #[tokio::test]
    async fn test_invalid_key_returns_403() {
        let (status, body) = call(Some(("x-api-key", "wrong"))).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Invalid API key");
    }

    #[tokio::test]
    async fn test_valid_key_reaches_handler() {
        let (status, body) = call(Some(("authorization", "secret"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"through");
    }
}
