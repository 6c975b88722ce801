use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Custom validator rejecting whitespace-only values
fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Brand entity - a product manufacturer or label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    /// Unique identifier
    pub id: Uuid,
    /// Brand name (duplicates allowed, lookups reuse the first match)
    pub name: String,
}

/// Product entity - a catalog item belonging to a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Reference to the owning brand, nullable at the storage level
    pub brand_id: Option<Uuid>,
    /// The owning brand, resolved on reads
    pub brand: Option<Brand>,
    /// Unit price, strictly positive
    pub price: u32,
}

/// Transport DTO for brands
///
/// `id` is absent on creation and populated on reads. When a client
/// supplies an id on creation it is honored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BrandDto {
    pub id: Option<Uuid>,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// Transport DTO for products
///
/// The brand is carried as a name string, not an id. On creation the
/// named brand is reused if it exists and created otherwise; on update
/// it must already exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDto {
    pub id: Option<Uuid>,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(
        length(min = 1, max = 255, message = "must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub brand: String,
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub price: u32,
}

impl Brand {
    /// Create a new brand with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }

    /// Build a brand from its DTO, honoring a client-supplied id
    pub fn from_dto(dto: BrandDto) -> Self {
        Self {
            id: dto.id.unwrap_or_else(Uuid::now_v7),
            name: dto.name,
        }
    }

    /// Apply a full replacement of mutable fields
    pub fn apply_update(&mut self, dto: BrandDto) {
        self.name = dto.name;
    }
}

impl From<Brand> for BrandDto {
    fn from(brand: Brand) -> Self {
        Self {
            id: Some(brand.id),
            name: brand.name,
        }
    }
}

impl Product {
    /// Build a product from its DTO and a resolved brand
    pub fn from_dto(dto: ProductDto, brand: Brand) -> Self {
        Self {
            id: dto.id.unwrap_or_else(Uuid::now_v7),
            name: dto.name,
            description: dto.description,
            brand_id: Some(brand.id),
            brand: Some(brand),
            price: dto.price,
        }
    }

    /// Apply a full replacement of mutable fields
    pub fn apply_update(&mut self, dto: ProductDto, brand: Brand) {
        self.name = dto.name;
        self.description = dto.description;
        self.brand_id = Some(brand.id);
        self.brand = Some(brand);
        self.price = dto.price;
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name,
            description: product.description,
            // A product whose brand row was removed serializes with an
            // empty brand name
            brand: product.brand.map(|b| b.name).unwrap_or_default(),
            price: product.price,
        }
    }
}
