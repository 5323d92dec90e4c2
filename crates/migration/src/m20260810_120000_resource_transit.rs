use sea_orm_migration::prelude::*;

use crate::m20260810_100000_charities::Charities;
use crate::m20260810_110000_resources::Resources;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum ResourceTransit {
    Table,
    Id,
    ResourceId,
    CharityFrom,
    CharityTo,
    Quantity,
    Status,
    Notes,
    CanExpire,
    TimeSent,
    TimeReceived,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResourceTransit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResourceTransit::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResourceTransit::ResourceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResourceTransit::CharityFrom)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResourceTransit::CharityTo)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResourceTransit::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResourceTransit::Status).string().not_null())
                    .col(ColumnDef::new(ResourceTransit::Notes).string())
                    .col(
                        ColumnDef::new(ResourceTransit::CanExpire)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResourceTransit::TimeSent).timestamp())
                    .col(ColumnDef::new(ResourceTransit::TimeReceived).timestamp())
                    .col(
                        ColumnDef::new(ResourceTransit::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resource_transit-resource_id")
                            .from(ResourceTransit::Table, ResourceTransit::ResourceId)
                            .to(Resources::Table, Resources::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resource_transit-charity_from")
                            .from(ResourceTransit::Table, ResourceTransit::CharityFrom)
                            .to(Charities::Table, Charities::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resource_transit-charity_to")
                            .from(ResourceTransit::Table, ResourceTransit::CharityTo)
                            .to(Charities::Table, Charities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-resource_transit-resource_id")
                    .table(ResourceTransit::Table)
                    .col(ResourceTransit::ResourceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-resource_transit-charity_from")
                    .table(ResourceTransit::Table)
                    .col(ResourceTransit::CharityFrom)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-resource_transit-charity_to")
                    .table(ResourceTransit::Table)
                    .col(ResourceTransit::CharityTo)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResourceTransit::Table).to_owned())
            .await
    }
}
