use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setup_steps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub download_link: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profile_step::Entity")]
    ProfileSteps,
    #[sea_orm(has_many = "super::computer_step::Entity")]
    ComputerSteps,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        super::profile_step::Relation::Profile.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::profile_step::Relation::Step.def().rev())
    }
}

impl Related<super::computer::Entity> for Entity {
    fn to() -> RelationDef {
        super::computer_step::Relation::Computer.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::computer_step::Relation::Step.def().rev())
    }
}

impl Related<super::profile_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileSteps.def()
    }
}

impl Related<super::computer_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComputerSteps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
