//! Events, RSVPs and attendee lists.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::EventStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::event::EventRepository,
    error::AppError,
    model::{
        event::{Attendee, Event, EventParams, PaginatedEvents, Rsvp},
        user::Viewer,
        PageParams,
    },
    util::validate::{require_non_blank, require_slug},
};

pub struct EventService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event.
    ///
    /// # Returns
    /// - `Ok(Event)` - Created event
    /// - `Err(AppError::BadRequest)` - Missing title, invalid slug, end not after start,
    ///   negative capacity or negative price
    /// - `Err(AppError::Conflict)` - Slug already used
    pub async fn create(&self, params: EventParams) -> Result<Event, AppError> {
        self.validate(&params, None).await?;

        let event = EventRepository::new(self.db).create(params).await?;
        tracing::info!("Created event {} ({})", event.id, event.slug);

        Ok(event)
    }

    pub async fn update(&self, id: i32, params: EventParams) -> Result<Event, AppError> {
        self.validate(&params, Some(id)).await?;

        EventRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !EventRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }
        Ok(())
    }

    /// Every event, latest start first.
    pub async fn get_all(&self, page: PageParams) -> Result<PaginatedEvents, AppError> {
        Ok(EventRepository::new(self.db).get_paginated(page, None).await?)
    }

    /// Published events that have not ended yet, soonest first.
    pub async fn get_upcoming(
        &self,
        page: PageParams,
        now: DateTime<Utc>,
    ) -> Result<PaginatedEvents, AppError> {
        Ok(EventRepository::new(self.db)
            .get_paginated(page, Some(now))
            .await?)
    }

    /// Published event detail with the number of seats taken.
    pub async fn get_by_slug(&self, slug: &str, viewer: &Viewer) -> Result<(Event, u64), AppError> {
        let repo = EventRepository::new(self.db);

        let event = repo
            .find_by_slug(slug)
            .await?
            .filter(|event| event.status == EventStatus::Published)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if !viewer.can_access(event.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to access this event".to_string(),
            ));
        }

        let taken = repo.taken_seats(event.id).await?;
        Ok((event, taken))
    }

    /// RSVPs the viewer to a non-ticketed event.
    ///
    /// # Returns
    /// - `Ok(Rsvp)` - New RSVP
    /// - `Err(AppError::NotFound)` - Unknown or unpublished event
    /// - `Err(AppError::BadRequest)` - Ticketed event, or it already started
    /// - `Err(AppError::Forbidden)` - Tier too low
    /// - `Err(AppError::Conflict)` - Already RSVP'd, or the event is full
    pub async fn rsvp(
        &self,
        event_id: i32,
        user_id: i32,
        viewer: &Viewer,
        now: DateTime<Utc>,
    ) -> Result<Rsvp, AppError> {
        let repo = EventRepository::new(self.db);
        let event = self.find_published(event_id).await?;

        if event.ticketed {
            return Err(AppError::BadRequest(
                "This event requires a ticket".to_string(),
            ));
        }
        if !viewer.can_access(event.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to attend this event".to_string(),
            ));
        }
        if event.has_started(now) {
            return Err(AppError::BadRequest(
                "This event has already started".to_string(),
            ));
        }
        if repo.find_rsvp(event.id, user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "You have already RSVP'd to this event".to_string(),
            ));
        }
        if event.is_full(repo.taken_seats(event.id).await?) {
            return Err(AppError::Conflict("This event is full".to_string()));
        }

        let rsvp = repo.create_rsvp(event.id, user_id).await?;
        tracing::info!("User {} RSVP'd to event {}", user_id, event.id);

        Ok(rsvp)
    }

    pub async fn cancel_rsvp(&self, event_id: i32, user_id: i32) -> Result<(), AppError> {
        if !EventRepository::new(self.db)
            .delete_rsvp(event_id, user_id)
            .await?
        {
            return Err(AppError::NotFound("RSVP not found".to_string()));
        }
        Ok(())
    }

    /// RSVP'd users and ticket holders of an event.
    ///
    /// # Returns
    /// - `Ok((rsvps, tickets))` - Attendees by admission type
    pub async fn get_attendees(
        &self,
        event_id: i32,
    ) -> Result<(Vec<Attendee>, Vec<Attendee>), AppError> {
        let repo = EventRepository::new(self.db);

        if repo.find_by_id(event_id).await?.is_none() {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        let rsvps = repo
            .get_rsvp_users(event_id)
            .await?
            .into_iter()
            .map(|user| Attendee { user, ticket: None })
            .collect();

        let tickets = repo
            .get_ticket_holders(event_id)
            .await?
            .into_iter()
            .map(|(ticket, user)| Attendee {
                user,
                ticket: Some(ticket),
            })
            .collect();

        Ok((rsvps, tickets))
    }

    /// Pending, issued and checked-in tickets plus RSVPs.
    pub async fn taken_seats(&self, event_id: i32) -> Result<u64, AppError> {
        Ok(EventRepository::new(self.db).taken_seats(event_id).await?)
    }

    /// Published event by ID, 404 otherwise.
    pub async fn find_published(&self, event_id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .filter(|event| event.status == EventStatus::Published)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    async fn validate(&self, params: &EventParams, except_id: Option<i32>) -> Result<(), AppError> {
        require_non_blank("title", &params.title)?;
        require_slug(&params.slug)?;

        if params.ends_at <= params.starts_at {
            return Err(AppError::BadRequest(
                "Event must end after it starts".to_string(),
            ));
        }
        if params.capacity < 0 {
            return Err(AppError::BadRequest(
                "Capacity cannot be negative".to_string(),
            ));
        }
        if params.ticketed && params.ticket_price_cents < 0 {
            return Err(AppError::BadRequest(
                "Ticket price cannot be negative".to_string(),
            ));
        }

        if EventRepository::new(self.db)
            .slug_taken(&params.slug, except_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "An event with slug '{}' already exists",
                params.slug
            )));
        }

        Ok(())
    }
}
