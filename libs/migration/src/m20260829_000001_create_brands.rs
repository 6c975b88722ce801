use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk_uuid(Brands::Id))
                    .col(string_len(Brands::Name, 255))
                    .to_owned(),
            )
            .await?;

        // Product creation looks brands up by name
        manager
            .create_index(
                Index::create()
                    .name("idx_brands_name")
                    .table(Brands::Table)
                    .col(Brands::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
}
