//! Coach call bookings.

use chrono::{DateTime, Duration, Timelike, Utc};
use entity::sea_orm_active_enums::CoachCallStatus;

use crate::model::coach_call::{CoachCallDto, CoachCallStatusDto};

impl From<CoachCallStatus> for CoachCallStatusDto {
    fn from(value: CoachCallStatus) -> Self {
        match value {
            CoachCallStatus::Scheduled => CoachCallStatusDto::Scheduled,
            CoachCallStatus::Completed => CoachCallStatusDto::Completed,
            CoachCallStatus::Cancelled => CoachCallStatusDto::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachCall {
    pub id: i32,
    pub user_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: CoachCallStatus,
    pub topic: Option<String>,
    pub calendar_event_id: Option<String>,
    pub meeting_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CoachCall {
    pub fn from_entity(entity: entity::coach_call::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            status: entity.status,
            topic: entity.topic,
            calendar_event_id: entity.calendar_event_id,
            meeting_url: entity.meeting_url,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CoachCallDto {
        CoachCallDto {
            id: self.id,
            user_id: self.user_id,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            status: self.status.into(),
            topic: self.topic,
            meeting_url: self.meeting_url,
            created_at: self.created_at,
        }
    }
}

/// Requested booking.
#[derive(Debug, Clone)]
pub struct BookCoachCallParams {
    pub user_id: i32,
    pub starts_at: DateTime<Utc>,
    pub topic: Option<String>,
}

/// Slot window derived from a start time and the configured call length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSlot {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl CallSlot {
    pub fn new(starts_at: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            starts_at,
            ends_at: starts_at + Duration::minutes(minutes),
        }
    }

    /// Whether the start sits on a slot boundary: whole minutes from midnight UTC divisible
    /// by the slot length, with zero seconds.
    pub fn is_aligned(&self, minutes: i64) -> bool {
        if minutes <= 0 {
            return false;
        }
        let start = self.starts_at;
        let minute_of_day = start.hour() as i64 * 60 + start.minute() as i64;

        start.second() == 0 && start.nanosecond() == 0 && minute_of_day % minutes == 0
    }

    /// Bounds of the UTC calendar day containing the start.
    pub fn day_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let day_start = self
            .starts_at
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or(self.starts_at);

        (day_start, day_start + Duration::days(1))
    }
}
