//! Migration: Create computers table

use sea_orm_migration::prelude::*;

use super::m20250512_000003_create_profiles::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Computers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Computers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Computers::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Computers::Deadline)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Computers::Notes).text().null())
                    .col(ColumnDef::new(Computers::ProfileId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Computers::Table, Computers::ProfileId)
                            .to(Profiles::Table, Profiles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_computers_profile_id")
                    .table(Computers::Table)
                    .col(Computers::ProfileId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Computers::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Computers {
    Table,
    Id,
    Name,
    Deadline,
    Notes,
    #[iden = "profile_id"]
    ProfileId,
}
