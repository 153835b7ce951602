use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PersonalizedProgramStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "personalized_program")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    /// Bit 0 = Monday ... bit 6 = Sunday.
    pub training_days: i32,
    /// JSON array of task titles repeated on every training day.
    pub daily_tasks: Json,
    pub status: PersonalizedProgramStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::checklist_item::Entity")]
    ChecklistItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
