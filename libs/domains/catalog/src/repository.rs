use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Brand, Product};

/// Repository trait for Brand persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// List all brands
    async fn get_all(&self) -> CatalogResult<Vec<Brand>>;

    /// Get a brand by ID
    async fn get(&self, id: Uuid) -> CatalogResult<Option<Brand>>;

    /// Insert a new brand
    async fn add(&self, brand: Brand) -> CatalogResult<Brand>;

    /// Insert a batch of brands in one transaction
    async fn add_many(&self, brands: Vec<Brand>) -> CatalogResult<Vec<Brand>>;

    /// Replace an existing brand
    async fn update(&self, brand: Brand) -> CatalogResult<Brand>;

    /// Replace a batch of brands in one transaction
    async fn update_many(&self, brands: Vec<Brand>) -> CatalogResult<Vec<Brand>>;

    /// Delete a brand by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Delete a batch of brands, returning the number of rows removed
    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64>;

    /// Find a brand by exact name, reusing the first match
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Brand>>;
}

/// Repository trait for Product persistence
///
/// Reads resolve the owning brand so returned products carry it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List all products with their brands
    async fn get_all(&self) -> CatalogResult<Vec<Product>>;

    /// Get a product by ID with its brand
    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Insert a new product
    async fn add(&self, product: Product) -> CatalogResult<Product>;

    /// Insert a batch of products in one transaction
    async fn add_many(&self, products: Vec<Product>) -> CatalogResult<Vec<Product>>;

    /// Replace an existing product
    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Replace a batch of products in one transaction
    async fn update_many(&self, products: Vec<Product>) -> CatalogResult<Vec<Product>>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Delete a batch of products, returning the number of rows removed
    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64>;
}

/// In-memory implementation of BrandRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBrandRepository {
    brands: Arc<RwLock<HashMap<Uuid, Brand>>>,
}

impl InMemoryBrandRepository {
    pub fn new() -> Self {
        Self {
            brands: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BrandRepository for InMemoryBrandRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Brand>> {
        let brands = self.brands.read().await;
        let mut result: Vec<Brand> = brands.values().cloned().collect();
        result.sort_by_key(|b| b.id);
        Ok(result)
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Brand>> {
        let brands = self.brands.read().await;
        Ok(brands.get(&id).cloned())
    }

    async fn add(&self, brand: Brand) -> CatalogResult<Brand> {
        let mut brands = self.brands.write().await;
        brands.insert(brand.id, brand.clone());

        tracing::info!(brand_id = %brand.id, "Created brand");
        Ok(brand)
    }

    async fn add_many(&self, input: Vec<Brand>) -> CatalogResult<Vec<Brand>> {
        let mut brands = self.brands.write().await;
        for brand in &input {
            brands.insert(brand.id, brand.clone());
        }

        tracing::info!(count = input.len(), "Created brands");
        Ok(input)
    }

    async fn update(&self, brand: Brand) -> CatalogResult<Brand> {
        let mut brands = self.brands.write().await;

        if !brands.contains_key(&brand.id) {
            return Err(CatalogError::BrandNotFound(brand.id));
        }

        brands.insert(brand.id, brand.clone());
        tracing::info!(brand_id = %brand.id, "Updated brand");
        Ok(brand)
    }

    async fn update_many(&self, input: Vec<Brand>) -> CatalogResult<Vec<Brand>> {
        let mut brands = self.brands.write().await;

        // All-or-nothing: verify every id before touching anything
        for brand in &input {
            if !brands.contains_key(&brand.id) {
                return Err(CatalogError::BrandNotFound(brand.id));
            }
        }

        for brand in &input {
            brands.insert(brand.id, brand.clone());
        }
        Ok(input)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut brands = self.brands.write().await;

        if brands.remove(&id).is_some() {
            tracing::info!(brand_id = %id, "Deleted brand");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        let mut brands = self.brands.write().await;
        let mut removed = 0;
        for id in ids {
            if brands.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Brand>> {
        let brands = self.brands.read().await;
        let mut matches: Vec<&Brand> = brands.values().filter(|b| b.name == name).collect();
        // Duplicate names are allowed; reuse the oldest match
        matches.sort_by_key(|b| b.id);
        Ok(matches.first().map(|b| (*b).clone()))
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn add(&self, product: Product) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn add_many(&self, input: Vec<Product>) -> CatalogResult<Vec<Product>> {
        let mut products = self.products.write().await;
        for product in &input {
            products.insert(product.id, product.clone());
        }

        tracing::info!(count = input.len(), "Created products");
        Ok(input)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id) {
            return Err(CatalogError::ProductNotFound(product.id));
        }

        products.insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn update_many(&self, input: Vec<Product>) -> CatalogResult<Vec<Product>> {
        let mut products = self.products.write().await;

        for product in &input {
            if !products.contains_key(&product.id) {
                return Err(CatalogError::ProductNotFound(product.id));
            }
        }

        for product in &input {
            products.insert(product.id, product.clone());
        }
        Ok(input)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        let mut products = self.products.write().await;
        let mut removed = 0;
        for id in ids {
            if products.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_get_brand() {
        let repo = InMemoryBrandRepository::new();

        let brand = repo.add(Brand::new("Acme")).await.unwrap();
        assert_eq!(brand.name, "Acme");

        let fetched = repo.get(brand.id).await.unwrap();
        assert_eq!(fetched, Some(brand));
    }

    #[tokio::test]
    async fn test_find_by_name_reuses_first_match() {
        let repo = InMemoryBrandRepository::new();

        let first = repo.add(Brand::new("Acme")).await.unwrap();
        repo.add(Brand::new("Acme")).await.unwrap();
        repo.add(Brand::new("Globex")).await.unwrap();

        let found = repo.find_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);

        assert!(repo.find_by_name("Initech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_brand_fails() {
        let repo = InMemoryBrandRepository::new();

        let result = repo.update(Brand::new("Nope")).await;
        assert!(matches!(result, Err(CatalogError::BrandNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_brand() {
        let repo = InMemoryBrandRepository::new();
        let brand = repo.add(Brand::new("Acme")).await.unwrap();

        assert!(repo.delete(brand.id).await.unwrap());
        assert!(!repo.delete(brand.id).await.unwrap());
        assert!(repo.get(brand.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_brand_batch_operations() {
        let repo = InMemoryBrandRepository::new();

        let brands = repo
            .add_many(vec![Brand::new("Acme"), Brand::new("Globex")])
            .await
            .unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);

        let ids: Vec<Uuid> = brands.iter().map(|b| b.id).collect();
        let removed = repo.delete_many(ids).await.unwrap();
        assert_eq!(removed, 2);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_many_is_all_or_nothing() {
        let repo = InMemoryBrandRepository::new();
        let mut stored = repo.add(Brand::new("Acme")).await.unwrap();
        stored.name = "Acme Corp".to_string();

        let result = repo
            .update_many(vec![stored.clone(), Brand::new("Missing")])
            .await;
        assert!(matches!(result, Err(CatalogError::BrandNotFound(_))));

        // The valid entry was not applied either
        let unchanged = repo.get(stored.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "Acme");
    }

    #[tokio::test]
    async fn test_add_and_get_product() {
        let repo = InMemoryProductRepository::new();
        let brand = Brand::new("Acme");

        let product = repo
            .add(Product::from_dto(
                crate::models::ProductDto {
                    id: None,
                    name: "Cola".to_string(),
                    description: "A soda".to_string(),
                    brand: brand.name.clone(),
                    price: 1,
                },
                brand,
            ))
            .await
            .unwrap();

        let fetched = repo.get(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Cola");
        assert_eq!(fetched.brand.unwrap().name, "Acme");
    }
}
