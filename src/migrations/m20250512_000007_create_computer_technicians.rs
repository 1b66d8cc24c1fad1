//! Migration: Create computer_technicians junction table

use sea_orm_migration::prelude::*;

use super::m20250512_000001_create_technicians::Technicians;
use super::m20250512_000004_create_computers::Computers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComputerTechnicians::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComputerTechnicians::ComputerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComputerTechnicians::TechnicianId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ComputerTechnicians::ComputerId)
                            .col(ComputerTechnicians::TechnicianId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComputerTechnicians::Table, ComputerTechnicians::ComputerId)
                            .to(Computers::Table, Computers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ComputerTechnicians::Table,
                                ComputerTechnicians::TechnicianId,
                            )
                            .to(Technicians::Table, Technicians::Id)
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
                    .table(ComputerTechnicians::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "computer_technicians"]
enum ComputerTechnicians {
    Table,
    #[iden = "computer_id"]
    ComputerId,
    #[iden = "technician_id"]
    TechnicianId,
}
