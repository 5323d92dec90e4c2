use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Charities {
    Table,
    Id,
    Name,
    Password,
    PrimaryCategory,
    SecondaryCategories,
    Tags,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Charities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Charities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Charities::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Charities::Password).string().not_null())
                    .col(
                        ColumnDef::new(Charities::PrimaryCategory)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Charities::SecondaryCategories)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Charities::Tags).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Charities::Table).to_owned())
            .await
    }
}
