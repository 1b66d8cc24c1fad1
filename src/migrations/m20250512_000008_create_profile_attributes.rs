//! Migration: Create profile_attributes table (preset key/value overlay)

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
                    .table(ProfileAttributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfileAttributes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfileAttributes::ProfileId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfileAttributes::Key).string().not_null())
                    .col(ColumnDef::new(ProfileAttributes::Value).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfileAttributes::Table, ProfileAttributes::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_profile_attributes_profile_id_key")
                    .table(ProfileAttributes::Table)
                    .col(ProfileAttributes::ProfileId)
                    .col(ProfileAttributes::Key)
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
                    .table(ProfileAttributes::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
#[iden = "profile_attributes"]
enum ProfileAttributes {
    Table,
    Id,
    #[iden = "profile_id"]
    ProfileId,
    Key,
    Value,
}
