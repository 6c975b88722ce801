//! Catalog Domain
//!
//! This module provides a complete domain implementation for managing
//! brands and the products that belong to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, id guards
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use domain_catalog::{
//!     handlers,
//!     repository::{InMemoryBrandRepository, InMemoryProductRepository},
//!     service::{BrandService, ProductService},
//! };
//!
//! let brands = Arc::new(InMemoryBrandRepository::new());
//! let products = Arc::new(InMemoryProductRepository::new());
//!
//! let brand_service = BrandService::new(Arc::clone(&brands));
//! let product_service = ProductService::new(products, brands);
//!
//! let brand_router = handlers::brand_router(brand_service);
//! let product_router = handlers::product_router(product_service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{Brand, BrandDto, Product, ProductDto};
pub use postgres::{PgBrandRepository, PgProductRepository};
pub use repository::{
    BrandRepository, InMemoryBrandRepository, InMemoryProductRepository, ProductRepository,
};
pub use service::{BrandService, ProductService};
