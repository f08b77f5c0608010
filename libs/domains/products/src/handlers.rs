//! HTTP handlers for Products API

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    AppError, ValidatedJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};
use crate::query::ListProductsQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::ProductPayload;

pub const PRODUCT_CREATED: &str = "Product created successfully";
pub const PRODUCT_UPDATED: &str = "Product updated successfully";
pub const PRODUCT_DELETED: &str = "Product deleted successfully";

/// `{ "data": <product> }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductData {
    pub data: Product,
}

/// `{ "message": "...", "data": <product> }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductMessage {
    pub message: String,
    pub data: Product,
}

impl ProductMessage {
    fn new(message: &str, data: Product) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            data,
        })
    }
}

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductPayload, CreateProduct, UpdateProduct, ProductPage, ProductData, ProductMessage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
///
/// Routes are relative; the caller nests them (e.g. under `/api/products`)
/// and applies the API-key gate.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Ids that are not UUIDs cannot exist, so they are reported as not found.
fn parse_id(raw: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ProductError::NotFound)
}

/// List products with filtering and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListProductsQuery),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<ProductPage>, AppError> {
    let Query(query) = query?;
    let page = service.list_products(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductPayload,
    security(("api_key" = [])),
    responses(
        (status = 201, description = "Product created successfully", body = ProductMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service
        .create_product(input)
        .await
        .map_err(ProductError::on_write_path)?;

    Ok((
        StatusCode::CREATED,
        ProductMessage::new(PRODUCT_CREATED, product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Product found", body = ProductData),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductData>> {
    let id = parse_id(&id)?;

    // Every lookup failure is reported as not found
    let product = service.get_product(id).await.map_err(|err| {
        if err != ProductError::NotFound {
            tracing::warn!(product_id = %id, error = %err, "Product lookup failed");
        }
        ProductError::NotFound
    })?;

    Ok(Json(ProductData { data: product }))
}

/// Update a product; only the supplied fields change
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = ProductPayload,
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Product updated successfully", body = ProductMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductMessage>> {
    let id = parse_id(&id)?;

    let product = service
        .update_product(id, input)
        .await
        .map_err(ProductError::on_write_path)?;

    Ok(ProductMessage::new(PRODUCT_UPDATED, product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Product deleted successfully", body = ProductMessage),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductMessage>> {
    let id = parse_id(&id)?;
    let product = service.delete_product(id).await?;

    Ok(ProductMessage::new(PRODUCT_DELETED, product))
}
