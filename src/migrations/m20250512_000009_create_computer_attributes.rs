//! Migration: Create computer_attributes table (instance key/value overlay)

use sea_orm_migration::prelude::*;

use super::m20250512_000004_create_computers::Computers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComputerAttributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComputerAttributes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComputerAttributes::ComputerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComputerAttributes::Key).string().not_null())
                    .col(
                        ColumnDef::new(ComputerAttributes::Value)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComputerAttributes::Table, ComputerAttributes::ComputerId)
                            .to(Computers::Table, Computers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_computer_attributes_computer_id_key")
                    .table(ComputerAttributes::Table)
                    .col(ComputerAttributes::ComputerId)
                    .col(ComputerAttributes::Key)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ComputerAttributes::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "computer_attributes"]
enum ComputerAttributes {
    Table,
    Id,
    #[iden = "computer_id"]
    ComputerId,
    Key,
    Value,
}
