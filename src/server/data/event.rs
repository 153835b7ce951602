//! Event and RSVP repository.
//!
//! Seats taken by an event are its RSVPs plus every ticket that is pending, issued or
//! checked in. Pending tickets hold a seat until the scheduler cancels them.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{EventStatus, TicketStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    event::{Event, EventParams, PaginatedEvents, Rsvp},
    ticket::Ticket,
    user::User,
    PageParams,
};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: EventParams) -> Result<Event, DbErr> {
        let now = Utc::now();
        let entity = entity::event::ActiveModel {
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            starts_at: ActiveValue::Set(params.starts_at),
            ends_at: ActiveValue::Set(params.ends_at),
            capacity: ActiveValue::Set(params.capacity),
            min_tier: ActiveValue::Set(params.min_tier),
            ticketed: ActiveValue::Set(params.ticketed),
            ticket_price_cents: ActiveValue::Set(params.ticket_price_cents),
            status: ActiveValue::Set(params.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn update(&self, id: i32, params: EventParams) -> Result<Option<Event>, DbErr> {
        let Some(entity) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::event::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.slug = ActiveValue::Set(params.slug);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.starts_at = ActiveValue::Set(params.starts_at);
        active.ends_at = ActiveValue::Set(params.ends_at);
        active.capacity = ActiveValue::Set(params.capacity);
        active.min_tier = ActiveValue::Set(params.min_tier);
        active.ticketed = ActiveValue::Set(params.ticketed);
        active.ticket_price_cents = ActiveValue::Set(params.ticket_price_cents);
        active.status = ActiveValue::Set(params.status);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        Ok(Some(Event::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Event::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find()
            .filter(entity::event::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Event::from_entity))
    }

    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Event::find().filter(entity::event::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(entity::event::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets events with their taken seats.
    ///
    /// Public listings (`upcoming_after` set) only include published events that have not
    /// ended by that time, soonest first. Admin listings include everything, latest first.
    pub async fn get_paginated(
        &self,
        page: PageParams,
        upcoming_after: Option<DateTime<Utc>>,
    ) -> Result<PaginatedEvents, DbErr> {
        let query = match upcoming_after {
            Some(now) => entity::prelude::Event::find()
                .filter(entity::event::Column::Status.eq(EventStatus::Published))
                .filter(entity::event::Column::EndsAt.gte(now))
                .order_by_asc(entity::event::Column::StartsAt),
            None => entity::prelude::Event::find().order_by_desc(entity::event::Column::StartsAt),
        };
        let paginator = query
            .order_by_asc(entity::event::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;

        let mut events = Vec::with_capacity(entities.len());
        for entity in entities {
            let taken = self.taken_seats(entity.id).await?;
            events.push((Event::from_entity(entity), taken));
        }

        Ok(PaginatedEvents {
            events,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }

    /// Seats held by RSVPs and pending, issued or checked-in tickets.
    pub async fn taken_seats(&self, event_id: i32) -> Result<u64, DbErr> {
        let rsvps = entity::prelude::EventRsvp::find()
            .filter(entity::event_rsvp::Column::EventId.eq(event_id))
            .count(self.db)
            .await?;
        let tickets = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::EventId.eq(event_id))
            .filter(entity::ticket::Column::Status.is_in([
                TicketStatus::Pending,
                TicketStatus::Issued,
                TicketStatus::CheckedIn,
            ]))
            .count(self.db)
            .await?;

        Ok(rsvps + tickets)
    }

    pub async fn find_rsvp(&self, event_id: i32, user_id: i32) -> Result<Option<Rsvp>, DbErr> {
        let entity = entity::prelude::EventRsvp::find()
            .filter(entity::event_rsvp::Column::EventId.eq(event_id))
            .filter(entity::event_rsvp::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Rsvp::from_entity))
    }

    pub async fn create_rsvp(&self, event_id: i32, user_id: i32) -> Result<Rsvp, DbErr> {
        let entity = entity::event_rsvp::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Rsvp::from_entity(entity))
    }

    /// Removes a user's RSVP, returning whether one existed.
    pub async fn delete_rsvp(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EventRsvp::delete_many()
            .filter(entity::event_rsvp::Column::EventId.eq(event_id))
            .filter(entity::event_rsvp::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// RSVPs of an event with the responding users, oldest first.
    pub async fn get_rsvp_users(&self, event_id: i32) -> Result<Vec<User>, DbErr> {
        let rows = entity::prelude::EventRsvp::find()
            .filter(entity::event_rsvp::Column::EventId.eq(event_id))
            .order_by_asc(entity::event_rsvp::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, user)| user.map(User::from_entity))
            .collect())
    }

    /// Issued and checked-in tickets of an event with their holders, oldest first.
    pub async fn get_ticket_holders(&self, event_id: i32) -> Result<Vec<(Ticket, User)>, DbErr> {
        let rows = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::EventId.eq(event_id))
            .filter(
                entity::ticket::Column::Status
                    .is_in([TicketStatus::Issued, TicketStatus::CheckedIn]),
            )
            .order_by_asc(entity::ticket::Column::CreatedAt)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(ticket, user)| {
                user.map(|user| (Ticket::from_entity(ticket), User::from_entity(user)))
            })
            .collect())
    }
}
