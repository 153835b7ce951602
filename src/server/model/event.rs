//! Event and RSVP domain models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{EventStatus, TierLevel};

use crate::{
    model::event::{
        AttendeeDto, EventDto, EventFormDto, EventStatusDto, PaginatedEventsDto, RsvpDto,
    },
    server::model::{ticket::Ticket, user::{User, Viewer}},
};

impl From<EventStatus> for EventStatusDto {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Draft => EventStatusDto::Draft,
            EventStatus::Published => EventStatusDto::Published,
            EventStatus::Cancelled => EventStatusDto::Cancelled,
            EventStatus::Archived => EventStatusDto::Archived,
        }
    }
}

impl From<EventStatusDto> for EventStatus {
    fn from(value: EventStatusDto) -> Self {
        match value {
            EventStatusDto::Draft => EventStatus::Draft,
            EventStatusDto::Published => EventStatus::Published,
            EventStatusDto::Cancelled => EventStatus::Cancelled,
            EventStatusDto::Archived => EventStatus::Archived,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Maximum attendees, 0 means unlimited.
    pub capacity: i32,
    pub min_tier: TierLevel,
    pub ticketed: bool,
    pub ticket_price_cents: i64,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            location: entity.location,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            capacity: entity.capacity,
            min_tier: entity.min_tier,
            ticketed: entity.ticketed,
            ticket_price_cents: entity.ticket_price_cents,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.capacity == 0
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }

    /// Whether `taken` seats leave no room for another attendee.
    pub fn is_full(&self, taken: u64) -> bool {
        !self.is_unlimited() && taken >= self.capacity as u64
    }

    /// Converts to a DTO.
    ///
    /// # Arguments
    /// - `taken` - Seats held by RSVPs or live tickets, used for remaining capacity
    /// - `viewer` - Requester, used for the `locked` flag
    pub fn into_dto(self, taken: u64, viewer: &Viewer) -> EventDto {
        let remaining_capacity = if self.is_unlimited() {
            None
        } else {
            Some((self.capacity as i64 - taken as i64).max(0))
        };

        EventDto {
            locked: !viewer.can_access(self.min_tier),
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            capacity: self.capacity,
            remaining_capacity,
            min_tier: self.min_tier.into(),
            ticketed: self.ticketed,
            ticket_price_cents: self.ticket_price_cents,
            status: self.status.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventParams {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: i32,
    pub min_tier: TierLevel,
    pub ticketed: bool,
    pub ticket_price_cents: i64,
    pub status: EventStatus,
}

impl EventParams {
    pub fn from_dto(dto: EventFormDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            description: dto.description,
            location: dto.location.filter(|l| !l.trim().is_empty()),
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            capacity: dto.capacity,
            min_tier: dto.min_tier.into(),
            ticketed: dto.ticketed,
            ticket_price_cents: if dto.ticketed {
                dto.ticket_price_cents
            } else {
                0
            },
            status: dto.status.into(),
        }
    }
}

/// Page of events paired with the seats taken for each.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedEvents {
    pub events: Vec<(Event, u64)>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedEvents {
    pub fn into_dto(self, viewer: &Viewer) -> PaginatedEventsDto {
        PaginatedEventsDto {
            events: self
                .events
                .into_iter()
                .map(|(event, taken)| event.into_dto(taken, viewer))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rsvp {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Rsvp {
    pub fn from_entity(entity: entity::event_rsvp::Model) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> RsvpDto {
        RsvpDto {
            event_id: self.event_id,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// Person attending an event, through an RSVP or a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub user: User,
    pub ticket: Option<Ticket>,
}

impl Attendee {
    pub fn into_dto(self) -> AttendeeDto {
        AttendeeDto {
            user_id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            ticket_code: self.ticket.as_ref().map(|t| t.code.clone()),
            ticket_status: self.ticket.map(|t| t.status.into()),
        }
    }
}
