use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{Brand, Product},
    repository::{BrandRepository, ProductRepository},
};

fn internal(e: DbErr) -> CatalogError {
    CatalogError::Internal(format!("Database error: {}", e))
}

#[derive(Clone)]
pub struct PgBrandRepository {
    base: BaseRepository<entity::brand::Entity>,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Brand>> {
        let models = entity::brand::Entity::find()
            .order_by_asc(entity::brand::Column::Id)
            .all(self.base.db())
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Brand>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn add(&self, brand: Brand) -> CatalogResult<Brand> {
        let active_model: entity::brand::ActiveModel = brand.into();
        let model = self.base.insert(active_model).await.map_err(internal)?;

        tracing::info!(brand_id = %model.id, "Created brand");
        Ok(model.into())
    }

    async fn add_many(&self, brands: Vec<Brand>) -> CatalogResult<Vec<Brand>> {
        let txn = self.base.db().begin().await.map_err(internal)?;

        let mut created = Vec::with_capacity(brands.len());
        for brand in brands {
            let active_model: entity::brand::ActiveModel = brand.into();
            let model = active_model.insert(&txn).await.map_err(internal)?;
            created.push(model.into());
        }

        txn.commit().await.map_err(internal)?;
        tracing::info!(count = created.len(), "Created brands");
        Ok(created)
    }

    async fn update(&self, brand: Brand) -> CatalogResult<Brand> {
        let id = brand.id;
        let active_model: entity::brand::ActiveModel = brand.into();
        // A vanished row surfaces as RecordNotUpdated, which carries no id
        let model = self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::BrandNotFound(id),
            other => internal(other),
        })?;

        tracing::info!(brand_id = %id, "Updated brand");
        Ok(model.into())
    }

    async fn update_many(&self, brands: Vec<Brand>) -> CatalogResult<Vec<Brand>> {
        let txn = self.base.db().begin().await.map_err(internal)?;

        let mut updated = Vec::with_capacity(brands.len());
        for brand in brands {
            let id = brand.id;
            let active_model: entity::brand::ActiveModel = brand.into();
            let model = active_model.update(&txn).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => CatalogError::BrandNotFound(id),
                other => internal(other),
            })?;
            updated.push(model.into());
        }

        txn.commit().await.map_err(internal)?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(internal)?;

        if rows_affected > 0 {
            tracing::info!(brand_id = %id, "Deleted brand");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        let result = entity::brand::Entity::delete_many()
            .filter(entity::brand::Column::Id.is_in(ids))
            .exec(self.base.db())
            .await
            .map_err(internal)?;

        Ok(result.rows_affected)
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Brand>> {
        // Duplicate names are allowed; reuse the oldest match
        let model = entity::brand::Entity::find()
            .filter(entity::brand::Column::Name.eq(name))
            .order_by_asc(entity::brand::Column::Id)
            .one(self.base.db())
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }
}

#[derive(Clone)]
pub struct PgProductRepository {
    base: BaseRepository<entity::product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> CatalogResult<Vec<Product>> {
        let rows = entity::product::Entity::find()
            .find_also_related(entity::brand::Entity)
            .order_by_asc(entity::product::Column::Id)
            .all(self.base.db())
            .await
            .map_err(internal)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let row = entity::product::Entity::find_by_id(id)
            .find_also_related(entity::brand::Entity)
            .one(self.base.db())
            .await
            .map_err(internal)?;

        Ok(row.map(Into::into))
    }

    async fn add(&self, product: Product) -> CatalogResult<Product> {
        let active_model: entity::product::ActiveModel = product.clone().into();
        let model = self.base.insert(active_model).await.map_err(internal)?;

        tracing::info!(product_id = %model.id, "Created product");
        // The caller already resolved the brand, keep it attached
        Ok(product)
    }

    async fn add_many(&self, products: Vec<Product>) -> CatalogResult<Vec<Product>> {
        let txn = self.base.db().begin().await.map_err(internal)?;

        for product in &products {
            let active_model: entity::product::ActiveModel = product.clone().into();
            active_model.insert(&txn).await.map_err(internal)?;
        }

        txn.commit().await.map_err(internal)?;
        tracing::info!(count = products.len(), "Created products");
        Ok(products)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let id = product.id;
        let active_model: entity::product::ActiveModel = product.clone().into();
        self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::ProductNotFound(id),
            other => internal(other),
        })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    async fn update_many(&self, products: Vec<Product>) -> CatalogResult<Vec<Product>> {
        let txn = self.base.db().begin().await.map_err(internal)?;

        for product in &products {
            let id = product.id;
            let active_model: entity::product::ActiveModel = product.clone().into();
            active_model.update(&txn).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => CatalogError::ProductNotFound(id),
                other => internal(other),
            })?;
        }

        txn.commit().await.map_err(internal)?;
        Ok(products)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(internal)?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> CatalogResult<u64> {
        let result = entity::product::Entity::delete_many()
            .filter(entity::product::Column::Id.is_in(ids))
            .exec(self.base.db())
            .await
            .map_err(internal)?;

        Ok(result.rows_affected)
    }
}
