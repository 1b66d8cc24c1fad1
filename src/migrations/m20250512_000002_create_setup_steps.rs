//! Migration: Create setup_steps table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SetupSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SetupSteps::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SetupSteps::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SetupSteps::DownloadLink).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SetupSteps::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "setup_steps"]
pub enum SetupSteps {
    Table,
    Id,
    Name,
    #[iden = "download_link"]
    DownloadLink,
}
