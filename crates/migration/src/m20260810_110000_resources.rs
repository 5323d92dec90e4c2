use sea_orm_migration::prelude::*;

use crate::m20260810_100000_charities::Charities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Resources {
    Table,
    Id,
    CharityId,
    Name,
    Description,
    Category,
    Quantity,
    QuantityReserved,
    ShareableQuantity,
    Unit,
    ExpiresAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::CharityId).string().not_null())
                    .col(ColumnDef::new(Resources::Name).string().not_null())
                    .col(ColumnDef::new(Resources::Description).string())
                    .col(ColumnDef::new(Resources::Category).string().not_null())
                    .col(
                        ColumnDef::new(Resources::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::QuantityReserved)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resources::ShareableQuantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Resources::Unit).string().not_null())
                    .col(ColumnDef::new(Resources::ExpiresAt).timestamp())
                    .col(ColumnDef::new(Resources::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resources-charity_id")
                            .from(Resources::Table, Resources::CharityId)
                            .to(Charities::Table, Charities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-resources-charity_id")
                    .table(Resources::Table)
                    .col(Resources::CharityId)
                    .to_owned(),
            )
            .await?;

        // Listing shareable stock filters on this column.
        manager
            .create_index(
                Index::create()
                    .name("idx-resources-shareable_quantity")
                    .table(Resources::Table)
                    .col(Resources::ShareableQuantity)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await
    }
}
