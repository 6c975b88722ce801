use axum::Router;
use std::sync::Arc;

use domain_catalog::{
    BrandService, PgBrandRepository, PgProductRepository, ProductService, handlers,
};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    let brands = Arc::new(PgBrandRepository::new(state.db.clone()));
    let products = Arc::new(PgProductRepository::new(state.db.clone()));

    let brand_service = BrandService::new(Arc::clone(&brands));
    let product_service = ProductService::new(products, brands);

    Router::new()
        .nest("/brand", handlers::brand_router(brand_service))
        .nest("/product", handlers::product_router(product_service))
}

/// Creates a router with the /ready endpoint that performs an actual
/// database health check.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
