//! Coach call factory.

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::CoachCallStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a 30 minute coach call for a user at the given start time.
pub async fn create_coach_call(
    db: &DatabaseConnection,
    user_id: i32,
    starts_at: DateTime<Utc>,
    status: CoachCallStatus,
) -> Result<entity::coach_call::Model, DbErr> {
    entity::coach_call::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        starts_at: ActiveValue::Set(starts_at),
        ends_at: ActiveValue::Set(starts_at + Duration::minutes(30)),
        status: ActiveValue::Set(status),
        topic: ActiveValue::Set(None),
        calendar_event_id: ActiveValue::Set(None),
        meeting_url: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
