//! Handler tests for the Catalog domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! The routers are built on the in-memory repositories, so these tests
//! exercise the full handler → service → repository path without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn brand_app() -> Router {
    let brands = Arc::new(InMemoryBrandRepository::new());
    handlers::brand_router(BrandService::new(brands))
}

fn catalog_app() -> (Router, Router) {
    let brands = Arc::new(InMemoryBrandRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());

    let brand_router = handlers::brand_router(BrandService::new(Arc::clone(&brands)));
    let product_router = handlers::product_router(ProductService::new(products, brands));
    (brand_router, product_router)
}

fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_brand_returns_201_with_id() {
    let app = brand_app();

    let response = app
        .clone()
        .oneshot(post("/", json!({ "name": "Acme" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    // The body is the new id serialized as a JSON string
    let id: Uuid = json_body(response.into_body()).await;
    assert!(!id.is_nil());

    let response = app.oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let brand: BrandDto = json_body(response.into_body()).await;
    assert_eq!(brand.name, "Acme");
}

#[tokio::test]
async fn test_create_brand_validates_input() {
    let app = brand_app();

    let response = app
        .oneshot(post("/", json!({ "name": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_brands() {
    let app = brand_app();

    for name in ["Acme", "Umbrella"] {
        let response = app
            .clone()
            .oneshot(post("/", json!({ "name": name })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let brands: Vec<BrandDto> = json_body(response.into_body()).await;
    assert_eq!(brands.len(), 2);
}

#[tokio::test]
async fn test_get_brand_rejects_malformed_uuid() {
    let app = brand_app();

    let response = app.oneshot(get("/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_brand_returns_404() {
    let app = brand_app();

    let response = app
        .oneshot(get(&format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_nil_brand_id_returns_400() {
    let app = brand_app();

    let response = app
        .oneshot(get(&format!("/{}", Uuid::nil())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_brand_id_mismatch_returns_400() {
    let app = brand_app();

    let response = app
        .clone()
        .oneshot(post("/", json!({ "name": "Acme" })))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    // Body id differs from path id, and the name is invalid. The mismatch
    // must win over validation.
    let response = app
        .oneshot(put(
            &format!("/{}", id),
            json!({ "id": Uuid::now_v7(), "name": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("does not match"));
}

#[tokio::test]
async fn test_update_missing_brand_returns_404() {
    let app = brand_app();
    let id = Uuid::now_v7();

    let response = app
        .oneshot(put(&format!("/{}", id), json!({ "id": id, "name": "Acme" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_brand_replaces_name() {
    let app = brand_app();

    let response = app
        .clone()
        .oneshot(post("/", json!({ "name": "Acme" })))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(put(
            &format!("/{}", id),
            json!({ "id": id, "name": "Acme Corp" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: BrandDto = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Acme Corp");
}

#[tokio::test]
async fn test_delete_brand_returns_204() {
    let app = brand_app();

    let response = app
        .clone()
        .oneshot(post("/", json!({ "name": "Acme" })))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again reports not found
    let response = app.oneshot(delete(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_creates_brand_on_the_fly() {
    let (brand_app, product_app) = catalog_app();

    let response = product_app
        .clone()
        .oneshot(post(
            "/",
            json!({
                "name": "Cola",
                "description": "A soda",
                "brand": "Acme",
                "price": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let id: Uuid = json_body(response.into_body()).await;

    // The brand was created as a side effect
    let response = brand_app.oneshot(get("/")).await.unwrap();
    let brands: Vec<BrandDto> = json_body(response.into_body()).await;
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].name, "Acme");

    // The product serializes its brand by name
    let response = product_app
        .oneshot(get(&format!("/{}", id)))
        .await
        .unwrap();
    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.name, "Cola");
    assert_eq!(product.description, "A soda");
    assert_eq!(product.brand, "Acme");
    assert_eq!(product.price, 1);
}

#[tokio::test]
async fn test_create_product_rejects_zero_price() {
    let (_, product_app) = catalog_app();

    let response = product_app
        .oneshot(post(
            "/",
            json!({
                "name": "Cola",
                "description": "",
                "brand": "Acme",
                "price": 0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_defaults_description() {
    let (_, product_app) = catalog_app();

    let response = product_app
        .clone()
        .oneshot(post(
            "/",
            json!({ "name": "Cola", "brand": "Acme", "price": 150 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let id: Uuid = json_body(response.into_body()).await;
    let response = product_app
        .oneshot(get(&format!("/{}", id)))
        .await
        .unwrap();
    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.description, "");
}

#[tokio::test]
async fn test_update_product_with_unknown_brand_returns_404() {
    let (_, product_app) = catalog_app();

    let response = product_app
        .clone()
        .oneshot(post(
            "/",
            json!({ "name": "Cola", "brand": "Acme", "price": 150 }),
        ))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    // Updates do not create brands
    let response = product_app
        .oneshot(put(
            &format!("/{}", id),
            json!({
                "id": id,
                "name": "Cola",
                "description": "",
                "brand": "Nonexistent",
                "price": 150
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_replaces_all_fields() {
    let (brand_app, product_app) = catalog_app();

    brand_app
        .oneshot(post("/", json!({ "name": "Umbrella" })))
        .await
        .unwrap();

    let response = product_app
        .clone()
        .oneshot(post(
            "/",
            json!({ "name": "Cola", "description": "A soda", "brand": "Acme", "price": 150 }),
        ))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    let response = product_app
        .oneshot(put(
            &format!("/{}", id),
            json!({
                "id": id,
                "name": "Cola Zero",
                "description": "No sugar",
                "brand": "Umbrella",
                "price": 175
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.name, "Cola Zero");
    assert_eq!(product.description, "No sugar");
    assert_eq!(product.brand, "Umbrella");
    assert_eq!(product.price, 175);
}

#[tokio::test]
async fn test_delete_product_returns_204() {
    let (_, product_app) = catalog_app();

    let response = product_app
        .clone()
        .oneshot(post(
            "/",
            json!({ "name": "Cola", "brand": "Acme", "price": 150 }),
        ))
        .await
        .unwrap();
    let id: Uuid = json_body(response.into_body()).await;

    let response = product_app
        .clone()
        .oneshot(delete(&format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = product_app
        .oneshot(get(&format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
