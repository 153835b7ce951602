//! Coach call repository.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::CoachCallStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::coach_call::{CallSlot, CoachCall};

pub struct CoachCallRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CoachCallRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        slot: CallSlot,
        topic: Option<String>,
    ) -> Result<CoachCall, DbErr> {
        let entity = entity::coach_call::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            starts_at: ActiveValue::Set(slot.starts_at),
            ends_at: ActiveValue::Set(slot.ends_at),
            status: ActiveValue::Set(CoachCallStatus::Scheduled),
            topic: ActiveValue::Set(topic),
            calendar_event_id: ActiveValue::Set(None),
            meeting_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(CoachCall::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<CoachCall>, DbErr> {
        let entity = entity::prelude::CoachCall::find_by_id(id).one(self.db).await?;

        Ok(entity.map(CoachCall::from_entity))
    }

    /// Whether the user has a non-cancelled call starting in `[day_start, day_end)`.
    pub async fn exists_in_window(
        &self,
        user_id: i32,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::CoachCall::find()
            .filter(entity::coach_call::Column::UserId.eq(user_id))
            .filter(entity::coach_call::Column::Status.ne(CoachCallStatus::Cancelled))
            .filter(entity::coach_call::Column::StartsAt.gte(day_start))
            .filter(entity::coach_call::Column::StartsAt.lt(day_end))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Calls ordered by start time, optionally restricted to one user.
    pub async fn get_all(&self, user_id: Option<i32>) -> Result<Vec<CoachCall>, DbErr> {
        let mut query = entity::prelude::CoachCall::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::coach_call::Column::UserId.eq(user_id));
        }

        let calls = query
            .order_by_asc(entity::coach_call::Column::StartsAt)
            .all(self.db)
            .await?;

        Ok(calls.into_iter().map(CoachCall::from_entity).collect())
    }

    /// Stores the calendar event created for a call.
    pub async fn set_calendar_event(
        &self,
        id: i32,
        calendar_event_id: String,
        meeting_url: Option<String>,
    ) -> Result<Option<CoachCall>, DbErr> {
        let Some(entity) = entity::prelude::CoachCall::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::coach_call::ActiveModel = entity.into();
        active.calendar_event_id = ActiveValue::Set(Some(calendar_event_id));
        active.meeting_url = ActiveValue::Set(meeting_url);
        let entity = active.update(self.db).await?;

        Ok(Some(CoachCall::from_entity(entity)))
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: CoachCallStatus,
    ) -> Result<Option<CoachCall>, DbErr> {
        let Some(entity) = entity::prelude::CoachCall::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::coach_call::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status);
        let entity = active.update(self.db).await?;

        Ok(Some(CoachCall::from_entity(entity)))
    }
}
