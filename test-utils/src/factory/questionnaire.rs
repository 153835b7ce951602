//! Questionnaire factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an active intake questionnaire with one required and one optional question.
pub async fn create_questionnaire(
    db: &DatabaseConnection,
) -> Result<entity::questionnaire::Model, DbErr> {
    entity::questionnaire::ActiveModel {
        title: ActiveValue::Set("Intake".to_string()),
        description: ActiveValue::Set(None),
        questions: ActiveValue::Set(serde_json::json!([
            { "id": "goals", "prompt": "What are your goals?", "required": true },
            { "id": "injuries", "prompt": "Any injuries?", "required": false }
        ])),
        active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
