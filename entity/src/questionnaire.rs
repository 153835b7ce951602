use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questionnaire")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// JSON array of `{id, prompt, required}` objects.
    pub questions: Json,
    pub active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::questionnaire_response::Entity")]
    QuestionnaireResponse,
}

impl Related<super::questionnaire_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionnaireResponse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
