use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{CatalogError, CatalogResult},
    models::{Brand, BrandDto, Product, ProductDto},
    repository::{BrandRepository, ProductRepository},
};

fn validate_dto<T: Validate>(dto: &T) -> CatalogResult<()> {
    dto.validate()
        .map_err(|e| CatalogError::Validation(e.to_string()))
}

fn require_id(id: Option<Uuid>) -> CatalogResult<Uuid> {
    match id {
        Some(id) if !id.is_nil() => Ok(id),
        _ => Err(CatalogError::InvalidId),
    }
}

/// Business logic for brand management, generic over the storage backend.
pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> Clone for BrandService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn get_brands(&self) -> CatalogResult<Vec<BrandDto>> {
        let brands = self.repository.get_all().await?;
        Ok(brands.into_iter().map(Into::into).collect())
    }

    pub async fn get_brand(&self, id: Uuid) -> CatalogResult<BrandDto> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }

        let brand = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::BrandNotFound(id))?;

        Ok(brand.into())
    }

    pub async fn create_brand(&self, dto: BrandDto) -> CatalogResult<Uuid> {
        validate_dto(&dto)?;

        let brand = self.repository.add(Brand::from_dto(dto)).await?;
        Ok(brand.id)
    }

    pub async fn create_brands(&self, dtos: Vec<BrandDto>) -> CatalogResult<Vec<Uuid>> {
        for dto in &dtos {
            validate_dto(dto)?;
        }

        let brands = self
            .repository
            .add_many(dtos.into_iter().map(Brand::from_dto).collect())
            .await?;

        Ok(brands.into_iter().map(|b| b.id).collect())
    }

    /// Full replacement of a brand. The body id must match the path id and
    /// the brand must already exist.
    pub async fn update_brand(&self, id: Uuid, dto: BrandDto) -> CatalogResult<BrandDto> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }
        if dto.id != Some(id) {
            return Err(CatalogError::IdMismatch);
        }

        let mut brand = self
            .repository
            .get(id)
            .await?
            .ok_or(CatalogError::BrandNotFound(id))?;

        validate_dto(&dto)?;

        brand.apply_update(dto);
        let updated = self.repository.update(brand).await?;
        Ok(updated.into())
    }

    pub async fn update_brands(&self, dtos: Vec<BrandDto>) -> CatalogResult<Vec<BrandDto>> {
        let mut brands = Vec::with_capacity(dtos.len());
        for dto in dtos {
            require_id(dto.id)?;
            validate_dto(&dto)?;
            // The id is known present and non-nil, so from_dto keeps it
            brands.push(Brand::from_dto(dto));
        }

        let updated = self.repository.update_many(brands).await?;
        Ok(updated.into_iter().map(Into::into).collect())
    }

    pub async fn delete_brand(&self, id: Uuid) -> CatalogResult<()> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }

        if !self.repository.delete(id).await? {
            return Err(CatalogError::BrandNotFound(id));
        }

        Ok(())
    }

    pub async fn delete_brands(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        for id in &ids {
            if id.is_nil() {
                return Err(CatalogError::InvalidId);
            }
        }

        self.repository.delete_many(ids).await
    }
}

/// Business logic for product management. Products reference brands by name
/// at the API boundary, so this service also needs brand storage.
pub struct ProductService<P: ProductRepository, B: BrandRepository> {
    products: Arc<P>,
    brands: Arc<B>,
}

impl<P: ProductRepository, B: BrandRepository> Clone for ProductService<P, B> {
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            brands: Arc::clone(&self.brands),
        }
    }
}

impl<P: ProductRepository, B: BrandRepository> ProductService<P, B> {
    pub fn new(products: Arc<P>, brands: Arc<B>) -> Self {
        Self { products, brands }
    }

    pub async fn get_products(&self) -> CatalogResult<Vec<ProductDto>> {
        let products = self.products.get_all().await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDto> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }

        let product = self
            .products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        Ok(product.into())
    }

    /// Creates a product. A brand with the given name is created on the fly
    /// when none exists yet.
    pub async fn create_product(&self, dto: ProductDto) -> CatalogResult<Uuid> {
        validate_dto(&dto)?;

        let brand = self.resolve_or_create_brand(&dto.brand).await?;
        let product = self.products.add(Product::from_dto(dto, brand)).await?;
        Ok(product.id)
    }

    pub async fn create_products(&self, dtos: Vec<ProductDto>) -> CatalogResult<Vec<Uuid>> {
        for dto in &dtos {
            validate_dto(dto)?;
        }

        let mut products = Vec::with_capacity(dtos.len());
        for dto in dtos {
            let brand = self.resolve_or_create_brand(&dto.brand).await?;
            products.push(Product::from_dto(dto, brand));
        }

        let created = self.products.add_many(products).await?;
        Ok(created.into_iter().map(|p| p.id).collect())
    }

    /// Full replacement of a product. Unlike creation, the referenced brand
    /// must already exist.
    pub async fn update_product(&self, id: Uuid, dto: ProductDto) -> CatalogResult<ProductDto> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }
        if dto.id != Some(id) {
            return Err(CatalogError::IdMismatch);
        }

        let mut product = self
            .products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        validate_dto(&dto)?;

        let brand = self
            .brands
            .find_by_name(&dto.brand)
            .await?
            .ok_or_else(|| CatalogError::UnknownBrand(dto.brand.clone()))?;

        product.apply_update(dto, brand);
        let updated = self.products.update(product).await?;
        Ok(updated.into())
    }

    pub async fn update_products(&self, dtos: Vec<ProductDto>) -> CatalogResult<Vec<ProductDto>> {
        let mut products = Vec::with_capacity(dtos.len());
        for dto in dtos {
            require_id(dto.id)?;
            validate_dto(&dto)?;

            let brand = self
                .brands
                .find_by_name(&dto.brand)
                .await?
                .ok_or_else(|| CatalogError::UnknownBrand(dto.brand.clone()))?;

            products.push(Product::from_dto(dto, brand));
        }

        let updated = self.products.update_many(products).await?;
        Ok(updated.into_iter().map(Into::into).collect())
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if id.is_nil() {
            return Err(CatalogError::InvalidId);
        }

        if !self.products.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(())
    }

    pub async fn delete_products(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        for id in &ids {
            if id.is_nil() {
                return Err(CatalogError::InvalidId);
            }
        }

        self.products.delete_many(ids).await
    }

    async fn resolve_or_create_brand(&self, name: &str) -> CatalogResult<Brand> {
        if let Some(brand) = self.brands.find_by_name(name).await? {
            return Ok(brand);
        }

        self.brands.add(Brand::new(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        InMemoryBrandRepository, InMemoryProductRepository, MockBrandRepository,
    };

    fn brand_service() -> BrandService<InMemoryBrandRepository> {
        BrandService::new(Arc::new(InMemoryBrandRepository::default()))
    }

    fn product_service(
    ) -> ProductService<InMemoryProductRepository, InMemoryBrandRepository> {
        ProductService::new(
            Arc::new(InMemoryProductRepository::default()),
            Arc::new(InMemoryBrandRepository::default()),
        )
    }

    fn brand_dto(name: &str) -> BrandDto {
        BrandDto {
            id: None,
            name: name.to_string(),
        }
    }

    fn product_dto(name: &str, brand: &str, price: u32) -> ProductDto {
        ProductDto {
            id: None,
            name: name.to_string(),
            description: String::new(),
            brand: brand.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_brand() {
        let service = brand_service();

        let id = service.create_brand(brand_dto("Acme")).await.unwrap();
        let fetched = service.get_brand(id).await.unwrap();

        assert_eq!(fetched.id, Some(id));
        assert_eq!(fetched.name, "Acme");
    }

    #[tokio::test]
    async fn test_create_brand_rejects_blank_name() {
        let service = brand_service();

        let result = service.create_brand(brand_dto("   ")).await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_brand_rejects_nil_id() {
        let service = brand_service();

        let result = service.get_brand(Uuid::nil()).await;

        assert!(matches!(result, Err(CatalogError::InvalidId)));
    }

    #[tokio::test]
    async fn test_get_missing_brand_returns_not_found() {
        let service = brand_service();
        let id = Uuid::now_v7();

        let result = service.get_brand(id).await;

        assert!(matches!(result, Err(CatalogError::BrandNotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn test_update_brand_rejects_id_mismatch() {
        let service = brand_service();
        let id = service.create_brand(brand_dto("Acme")).await.unwrap();

        let mut dto = brand_dto("Renamed");
        dto.id = Some(Uuid::now_v7());
        let result = service.update_brand(id, dto).await;

        assert!(matches!(result, Err(CatalogError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_update_brand_rejects_missing_body_id() {
        let service = brand_service();
        let id = service.create_brand(brand_dto("Acme")).await.unwrap();

        let result = service.update_brand(id, brand_dto("Renamed")).await;

        assert!(matches!(result, Err(CatalogError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_update_missing_brand_before_validation() {
        let service = brand_service();
        let id = Uuid::now_v7();

        // Invalid name, but the existence check comes first
        let mut dto = brand_dto("");
        dto.id = Some(id);
        let result = service.update_brand(id, dto).await;

        assert!(matches!(result, Err(CatalogError::BrandNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_brand_replaces_name() {
        let service = brand_service();
        let id = service.create_brand(brand_dto("Acme")).await.unwrap();

        let mut dto = brand_dto("Acme Corp");
        dto.id = Some(id);
        let updated = service.update_brand(id, dto).await.unwrap();

        assert_eq!(updated.name, "Acme Corp");
        assert_eq!(service.get_brand(id).await.unwrap().name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_delete_missing_brand_returns_not_found() {
        let service = brand_service();

        let result = service.delete_brand(Uuid::now_v7()).await;

        assert!(matches!(result, Err(CatalogError::BrandNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_brands_returns_ids_in_order() {
        let service = brand_service();

        let ids = service
            .create_brands(vec![brand_dto("One"), brand_dto("Two")])
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(service.get_brand(ids[0]).await.unwrap().name, "One");
        assert_eq!(service.get_brand(ids[1]).await.unwrap().name, "Two");
    }

    #[tokio::test]
    async fn test_update_brands_keeps_ids_and_replaces_names() {
        let service = brand_service();
        let ids = service
            .create_brands(vec![brand_dto("One"), brand_dto("Two")])
            .await
            .unwrap();

        let updated = service
            .update_brands(vec![
                BrandDto {
                    id: Some(ids[0]),
                    name: "First".to_string(),
                },
                BrandDto {
                    id: Some(ids[1]),
                    name: "Second".to_string(),
                },
            ])
            .await
            .unwrap();

        assert_eq!(updated[0].id, Some(ids[0]));
        assert_eq!(updated[1].id, Some(ids[1]));
        assert_eq!(service.get_brand(ids[0]).await.unwrap().name, "First");
        assert_eq!(service.get_brand(ids[1]).await.unwrap().name, "Second");
    }

    #[tokio::test]
    async fn test_create_product_creates_missing_brand() {
        let products = Arc::new(InMemoryProductRepository::default());
        let brands = Arc::new(InMemoryBrandRepository::default());
        let service = ProductService::new(products, Arc::clone(&brands));

        let id = service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();

        let fetched = service.get_product(id).await.unwrap();
        assert_eq!(fetched.brand, "Acme");
        assert!(brands.find_by_name("Acme").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_product_reuses_existing_brand() {
        let products = Arc::new(InMemoryProductRepository::default());
        let brands = Arc::new(InMemoryBrandRepository::default());
        let brand = brands.add(Brand::new("Acme")).await.unwrap();
        let service = ProductService::new(products, Arc::clone(&brands));

        service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();

        let all = brands.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, brand.id);
    }

    #[tokio::test]
    async fn test_create_product_rejects_zero_price() {
        let service = product_service();

        let result = service.create_product(product_dto("Cola", "Acme", 0)).await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_product_requires_existing_brand() {
        let service = product_service();
        let id = service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();

        let mut dto = product_dto("Cola", "Nonexistent", 150);
        dto.id = Some(id);
        let result = service.update_product(id, dto).await;

        assert!(matches!(result, Err(CatalogError::UnknownBrand(name)) if name == "Nonexistent"));
    }

    #[tokio::test]
    async fn test_update_product_id_mismatch_checked_before_validation() {
        let service = product_service();
        let id = service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();

        // Price of zero is invalid, but the id guard fires first
        let mut dto = product_dto("Cola", "Acme", 0);
        dto.id = Some(Uuid::now_v7());
        let result = service.update_product(id, dto).await;

        assert!(matches!(result, Err(CatalogError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_update_missing_product_checked_before_validation() {
        let service = product_service();
        let id = Uuid::now_v7();

        let mut dto = product_dto("", "Acme", 0);
        dto.id = Some(id);
        let result = service.update_product(id, dto).await;

        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_product_replaces_all_fields() {
        let service = product_service();
        let id = service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();
        service.create_product(product_dto("Chips", "Umbrella", 300)).await.unwrap();

        let dto = ProductDto {
            id: Some(id),
            name: "Cola Zero".to_string(),
            description: "No sugar".to_string(),
            brand: "Umbrella".to_string(),
            price: 175,
        };
        let updated = service.update_product(id, dto).await.unwrap();

        assert_eq!(updated.name, "Cola Zero");
        assert_eq!(updated.description, "No sugar");
        assert_eq!(updated.brand, "Umbrella");
        assert_eq!(updated.price, 175);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let service = product_service();
        let id = service
            .create_product(product_dto("Cola", "Acme", 150))
            .await
            .unwrap();

        service.delete_product(id).await.unwrap();

        let result = service.get_product(id).await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut mock = MockBrandRepository::new();
        mock.expect_get_all()
            .returning(|| Err(CatalogError::Internal("Database error: timeout".to_string())));
        let service = BrandService::new(Arc::new(mock));

        let result = service.get_brands().await;

        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }

    #[tokio::test]
    async fn test_delete_brands_rejects_nil_id() {
        let service = brand_service();

        let result = service.delete_brands(vec![Uuid::now_v7(), Uuid::nil()]).await;

        assert!(matches!(result, Err(CatalogError::InvalidId)));
    }
}
