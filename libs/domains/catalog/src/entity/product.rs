use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
///
/// Price is stored as BIGINT; the domain model constrains it to u32.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub brand_id: Option<Uuid>,
    pub price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Brand,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from a (product, brand) join row to the domain model
impl From<(Model, Option<super::brand::Model>)> for crate::models::Product {
    fn from((model, brand): (Model, Option<super::brand::Model>)) -> Self {
        // Our write paths only store u32 values, but the column is BIGINT;
        // an externally written row outside that range saturates instead of
        // wrapping to 0
        let price = model.price.clamp(0, i64::from(u32::MAX)) as u32;

        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            brand_id: model.brand_id,
            brand: brand.map(Into::into),
            price,
        }
    }
}

impl From<crate::models::Product> for ActiveModel {
    fn from(product: crate::models::Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            brand_id: Set(product.brand_id),
            price: Set(i64::from(product.price)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn row_with_price(price: i64) -> Model {
        Model {
            id: Uuid::now_v7(),
            name: "Cola".to_string(),
            description: "A soda".to_string(),
            brand_id: None,
            price,
        }
    }

    #[test]
    fn out_of_range_stored_prices_saturate() {
        let negative: Product = (row_with_price(-5), None).into();
        assert_eq!(negative.price, 0);

        let oversized: Product = (row_with_price(i64::from(u32::MAX) + 1), None).into();
        assert_eq!(oversized.price, u32::MAX);
    }

    #[test]
    fn in_range_stored_prices_convert_exactly() {
        let product: Product = (row_with_price(1299), None).into();
        assert_eq!(product.price, 1299);
    }
}
