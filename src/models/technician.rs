use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technicians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::computer_technician::Entity")]
    ComputerTechnicians,
}

impl Related<super::computer::Entity> for Entity {
    fn to() -> RelationDef {
        super::computer_technician::Relation::Computer.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::computer_technician::Relation::Technician.def().rev())
    }
}

impl Related<super::computer_technician::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComputerTechnicians.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
