//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Brand and product catalog management API"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    nest(
        (path = "/brand", api = domain_catalog::handlers::BrandApiDoc),
        (path = "/product", api = domain_catalog::handlers::ProductApiDoc)
    )
)]
pub struct ApiDoc;
