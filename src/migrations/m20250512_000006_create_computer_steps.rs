//! Migration: Create computer_steps junction table (completed step sets)

use sea_orm_migration::prelude::*;

use super::m20250512_000002_create_setup_steps::SetupSteps;
use super::m20250512_000004_create_computers::Computers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComputerSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComputerSteps::ComputerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComputerSteps::StepId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ComputerSteps::ComputerId)
                            .col(ComputerSteps::StepId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComputerSteps::Table, ComputerSteps::ComputerId)
                            .to(Computers::Table, Computers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComputerSteps::Table, ComputerSteps::StepId)
                            .to(SetupSteps::Table, SetupSteps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ComputerSteps::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "computer_steps"]
enum ComputerSteps {
    Table,
    #[iden = "computer_id"]
    ComputerId,
    #[iden = "step_id"]
    StepId,
}
