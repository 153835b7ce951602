use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{membership::TierLevelDto, ticket::TicketStatusDto};

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum EventStatusDto {
    Draft,
    Published,
    Cancelled,
    Archived,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct EventDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Maximum attendees, 0 means unlimited.
    pub capacity: i32,
    /// Seats left, `None` for unlimited events.
    pub remaining_capacity: Option<i64>,
    pub min_tier: TierLevelDto,
    pub ticketed: bool,
    pub ticket_price_cents: i64,
    pub status: EventStatusDto,
    pub locked: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PaginatedEventsDto {
    pub events: Vec<EventDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct EventFormDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub capacity: i32,
    pub min_tier: TierLevelDto,
    #[serde(default)]
    pub ticketed: bool,
    #[serde(default)]
    pub ticket_price_cents: i64,
    pub status: EventStatusDto,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct RsvpDto {
    pub event_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct AttendeeDto {
    pub user_id: i32,
    pub name: String,
    pub email: Option<String>,
    /// Ticket code for ticket holders, `None` for RSVPs.
    pub ticket_code: Option<String>,
    pub ticket_status: Option<TicketStatusDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct AttendeesDto {
    pub rsvps: Vec<AttendeeDto>,
    pub tickets: Vec<AttendeeDto>,
}
