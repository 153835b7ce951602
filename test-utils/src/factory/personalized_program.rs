//! Personalized program and checklist item factories.

use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::PersonalizedProgramStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an active personalized program for a user.
///
/// `training_days` is a weekday bitmask with Monday as bit 0.
pub async fn create_personalized_program(
    db: &DatabaseConnection,
    user_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    training_days: i32,
) -> Result<entity::personalized_program::Model, DbErr> {
    let now = Utc::now();
    entity::personalized_program::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        title: ActiveValue::Set("Base building".to_string()),
        notes: ActiveValue::Set(None),
        start_date: ActiveValue::Set(start_date),
        end_date: ActiveValue::Set(end_date),
        training_days: ActiveValue::Set(training_days),
        daily_tasks: ActiveValue::Set(serde_json::json!(["Warm up", "Main set"])),
        status: ActiveValue::Set(PersonalizedProgramStatus::Active),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a checklist item on the given date.
pub async fn create_checklist_item(
    db: &DatabaseConnection,
    personalized_program_id: i32,
    date: NaiveDate,
    title: impl Into<String>,
) -> Result<entity::checklist_item::Model, DbErr> {
    entity::checklist_item::ActiveModel {
        personalized_program_id: ActiveValue::Set(personalized_program_id),
        date: ActiveValue::Set(date),
        title: ActiveValue::Set(title.into()),
        position: ActiveValue::Set(0),
        completed_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
