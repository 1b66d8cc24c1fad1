//! Migration: Create profile_steps junction table (profile template sets)

use sea_orm_migration::prelude::*;

use super::m20250512_000002_create_setup_steps::SetupSteps;
use super::m20250512_000003_create_profiles::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProfileSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfileSteps::ProfileId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfileSteps::StepId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProfileSteps::ProfileId)
                            .col(ProfileSteps::StepId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileSteps::Table, ProfileSteps::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileSteps::Table, ProfileSteps::StepId)
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
                    .table(ProfileSteps::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "profile_steps"]
enum ProfileSteps {
    Table,
    #[iden = "profile_id"]
    ProfileId,
    #[iden = "step_id"]
    StepId,
}
