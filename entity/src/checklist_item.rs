use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "checklist_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub personalized_program_id: i32,
    pub date: Date,
    pub title: String,
    pub position: i32,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::personalized_program::Entity",
        from = "Column::PersonalizedProgramId",
        to = "super::personalized_program::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PersonalizedProgram,
}

impl Related<super::personalized_program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonalizedProgram.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
