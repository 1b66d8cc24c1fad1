use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "computer_steps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub computer_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub step_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::computer::Entity",
        from = "Column::ComputerId",
        to = "super::computer::Column::Id"
    )]
    Computer,
    #[sea_orm(
        belongs_to = "super::setup_step::Entity",
        from = "Column::StepId",
        to = "super::setup_step::Column::Id"
    )]
    Step,
}

impl Related<super::computer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Computer.def()
    }
}

impl Related<super::setup_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Step.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
