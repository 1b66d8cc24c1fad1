use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::computer::Entity")]
    Computers,
    #[sea_orm(has_many = "super::profile_step::Entity")]
    ProfileSteps,
    #[sea_orm(has_many = "super::profile_attribute::Entity")]
    Attributes,
}

impl Related<super::setup_step::Entity> for Entity {
    fn to() -> RelationDef {
        super::profile_step::Relation::Step.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::profile_step::Relation::Profile.def().rev())
    }
}

impl Related<super::computer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Computers.def()
    }
}

impl Related<super::profile_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileSteps.def()
    }
}

impl Related<super::profile_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
