use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "computers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub deadline: Option<DateTimeUtc>,
    pub notes: Option<String>,
    pub profile_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    #[sea_orm(has_many = "super::computer_step::Entity")]
    ComputerSteps,
    #[sea_orm(has_many = "super::computer_technician::Entity")]
    ComputerTechnicians,
    #[sea_orm(has_many = "super::computer_attribute::Entity")]
    Attributes,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::setup_step::Entity> for Entity {
    fn to() -> RelationDef {
        super::computer_step::Relation::Step.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::computer_step::Relation::Computer.def().rev())
    }
}

impl Related<super::technician::Entity> for Entity {
    fn to() -> RelationDef {
        super::computer_technician::Relation::Technician.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::computer_technician::Relation::Computer.def().rev())
    }
}

impl Related<super::computer_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComputerSteps.def()
    }
}

impl Related<super::computer_technician::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComputerTechnicians.def()
    }
}

impl Related<super::computer_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
