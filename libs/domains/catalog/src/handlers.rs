use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome, UuidPath,
    ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{BrandDto, ProductDto};
use crate::repository::{BrandRepository, ProductRepository};
use crate::service::{BrandService, ProductService};

pub const BRAND_TAG: &str = "brands";
pub const PRODUCT_TAG: &str = "products";

/// OpenAPI documentation for the brand endpoints
#[derive(OpenApi)]
#[openapi(
    paths(get_brands, create_brand, get_brand, update_brand, delete_brand),
    components(
        schemas(BrandDto),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = BRAND_TAG, description = "Brand management endpoints")
    )
)]
pub struct BrandApiDoc;

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        get_products,
        create_product,
        get_product,
        update_product,
        delete_product
    ),
    components(
        schemas(ProductDto),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCT_TAG, description = "Product management endpoints")
    )
)]
pub struct ProductApiDoc;

/// Create the brand router with all HTTP endpoints
pub fn brand_router<R: BrandRepository + 'static>(service: BrandService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_brands).post(create_brand))
        .route(
            "/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .with_state(shared_service)
}

/// Create the product router with all HTTP endpoints
pub fn product_router<P, B>(service: ProductService<P, B>) -> Router
where
    P: ProductRepository + 'static,
    B: BrandRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all brands
#[utoipa::path(
    get,
    path = "",
    tag = BRAND_TAG,
    responses(
        (status = 200, description = "List of brands", body = Vec<BrandDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
) -> CatalogResult<Json<Vec<BrandDto>>> {
    let brands = service.get_brands().await?;
    Ok(Json(brands))
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "",
    tag = BRAND_TAG,
    request_body = BrandDto,
    responses(
        (status = 201, description = "Brand created successfully", body = Uuid),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<BrandDto>,
) -> CatalogResult<impl IntoResponse> {
    let name = input.name.clone();
    let id = service.create_brand(input).await?;

    AuditEvent::new(
        "brand.create",
        Some(format!("brand:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "brand_name": name }))
    .log();

    Ok((StatusCode::CREATED, Json(id)))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = BRAND_TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand found", body = BrandDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<BrandDto>> {
    let brand = service.get_brand(id).await?;
    Ok(Json(brand))
}

/// Replace a brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = BRAND_TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID")
    ),
    request_body = BrandDto,
    responses(
        (status = 200, description = "Brand updated successfully", body = BrandDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    // Plain Json so the id match is checked before field validation
    Json(input): Json<BrandDto>,
) -> CatalogResult<Json<BrandDto>> {
    let brand = service.update_brand(id, input).await?;

    AuditEvent::new(
        "brand.update",
        Some(format!("brand:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(brand))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = BRAND_TAG,
    params(
        ("id" = Uuid, Path, description = "Brand ID")
    ),
    responses(
        (status = 204, description = "Brand deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_brand(id).await?;

    AuditEvent::new(
        "brand.delete",
        Some(format!("brand:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = PRODUCT_TAG,
    responses(
        (status = 200, description = "List of products", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products<P: ProductRepository, B: BrandRepository>(
    State(service): State<Arc<ProductService<P, B>>>,
) -> CatalogResult<Json<Vec<ProductDto>>> {
    let products = service.get_products().await?;
    Ok(Json(products))
}

/// Create a new product, creating its brand when it does not exist yet
#[utoipa::path(
    post,
    path = "",
    tag = PRODUCT_TAG,
    request_body = ProductDto,
    responses(
        (status = 201, description = "Product created successfully", body = Uuid),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, B: BrandRepository>(
    State(service): State<Arc<ProductService<P, B>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductDto>,
) -> CatalogResult<impl IntoResponse> {
    let name = input.name.clone();
    let brand = input.brand.clone();
    let id = service.create_product(input).await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "product_name": name, "brand": brand }))
    .log();

    Ok((StatusCode::CREATED, Json(id)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, B: BrandRepository>(
    State(service): State<Arc<ProductService<P, B>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product. The referenced brand must already exist.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, B: BrandRepository>(
    State(service): State<Arc<ProductService<P, B>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    Json(input): Json<ProductDto>,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.update_product(id, input).await?;

    AuditEvent::new(
        "product.update",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, B: BrandRepository>(
    State(service): State<Arc<ProductService<P, B>>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_product(id).await?;

    AuditEvent::new(
        "product.delete",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
