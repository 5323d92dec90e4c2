use sea_orm_migration::prelude::*;

use crate::m20260810_100000_charities::Charities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Notifications {
    Table,
    Id,
    CharityId,
    Title,
    Body,
    TransitId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::CharityId).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Body).string().not_null())
                    .col(ColumnDef::new(Notifications::TransitId).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notifications-charity_id")
                            .from(Notifications::Table, Notifications::CharityId)
                            .to(Charities::Table, Charities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Inbox reads are always per charity, newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx-notifications-charity_id-created_at")
                    .table(Notifications::Table)
                    .col(Notifications::CharityId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}
