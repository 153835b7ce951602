//! Event and RSVP factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::{EventStatus, TierLevel};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for events.
///
/// Defaults: published, free tier, non-ticketed, unlimited capacity, starting in seven
/// days and lasting two hours.
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    starts_at: DateTime<Utc>,
    capacity: i32,
    min_tier: TierLevel,
    ticketed: bool,
    ticket_price_cents: i64,
    status: EventStatus,
}

impl<'a> EventFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Event {}", id),
            slug: format!("event-{}", id),
            starts_at: Utc::now() + Duration::days(7),
            capacity: 0,
            min_tier: TierLevel::Free,
            ticketed: false,
            ticket_price_cents: 0,
            status: EventStatus::Published,
        }
    }

    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn min_tier(mut self, min_tier: TierLevel) -> Self {
        self.min_tier = min_tier;
        self
    }

    /// Makes the event ticketed at the given price.
    pub fn ticketed(mut self, price_cents: i64) -> Self {
        self.ticketed = true;
        self.ticket_price_cents = price_cents;
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        let now = Utc::now();
        entity::event::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set("Community meetup.".to_string()),
            location: ActiveValue::Set(Some("Main hall".to_string())),
            starts_at: ActiveValue::Set(self.starts_at),
            ends_at: ActiveValue::Set(self.starts_at + Duration::hours(2)),
            capacity: ActiveValue::Set(self.capacity),
            min_tier: ActiveValue::Set(self.min_tier),
            ticketed: ActiveValue::Set(self.ticketed),
            ticket_price_cents: ActiveValue::Set(self.ticket_price_cents),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a published, free, non-ticketed event.
pub async fn create_event(db: &DatabaseConnection) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).build().await
}

/// Creates a published ticketed event with the given price.
pub async fn create_ticketed_event(
    db: &DatabaseConnection,
    price_cents: i64,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).ticketed(price_cents).build().await
}

/// Creates an RSVP for a user.
pub async fn create_rsvp(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::event_rsvp::Model, DbErr> {
    entity::event_rsvp::ActiveModel {
        event_id: ActiveValue::Set(event_id),
        user_id: ActiveValue::Set(user_id),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
