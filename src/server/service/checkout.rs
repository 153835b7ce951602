//! Event ticket checkout.
//!
//! Free checkouts (no price, or a coupon covering all of it) issue the ticket at once and
//! run fulfilment. Paid checkouts hold a pending ticket and hand the buyer a Stripe
//! payment page; the webhook issues the ticket once payment completes.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{EventStatus, TicketStatus};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{event::EventRepository, ticket::TicketRepository},
    error::AppError,
    integration::{stripe::PaymentCheckout, Integrations},
    model::{
        event::Event,
        ticket::{CheckoutOutcome, CreateTicketParams},
        user::{User, Viewer},
    },
    service::{
        coupon::{CouponService, Quote},
        fulfilment::FulfilmentService,
    },
};

pub struct CheckoutService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub app_url: &'a str,
}

impl<'a> CheckoutService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, app_url: &'a str) -> Self {
        Self {
            db,
            integrations,
            app_url,
        }
    }

    /// Buys one ticket to an event for `user`.
    ///
    /// # Arguments
    /// - `event_id` - Event to attend
    /// - `user` - Buyer
    /// - `viewer` - Buyer's access, used for the tier check
    /// - `coupon_code` - Optional coupon entered at checkout
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(CheckoutOutcome::Issued)` - Nothing to pay, ticket issued
    /// - `Ok(CheckoutOutcome::PaymentRequired)` - Pending ticket awaiting payment
    /// - `Err(AppError::NotFound)` - Unknown event
    /// - `Err(AppError::BadRequest)` - Event not on sale, already started, or coupon rejected
    /// - `Err(AppError::Forbidden)` - Tier too low
    /// - `Err(AppError::Conflict)` - Sold out, or the user already holds a ticket
    ///
    /// An unpaid ticket the user already holds for the event is cancelled and replaced.
    /// - `Err(AppError::IntegrationErr)` - Stripe failed; the pending ticket is removed
    pub async fn checkout(
        &self,
        event_id: i32,
        user: &User,
        viewer: &Viewer,
        coupon_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, AppError> {
        let event_repo = EventRepository::new(self.db);
        let ticket_repo = TicketRepository::new(self.db);

        let event = event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.status != EventStatus::Published || !event.ticketed {
            return Err(AppError::BadRequest(
                "Tickets are not on sale for this event".to_string(),
            ));
        }
        if event.has_started(now) {
            return Err(AppError::BadRequest(
                "This event has already started".to_string(),
            ));
        }
        if !viewer.can_access(event.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to attend this event".to_string(),
            ));
        }
        if ticket_repo.user_has_live_ticket(event.id, user.id).await? {
            return Err(AppError::Conflict(
                "You already have a ticket for this event".to_string(),
            ));
        }

        // A retried checkout replaces the user's unpaid ticket, so its seat is theirs.
        let own_pending = ticket_repo
            .count_pending_for_user(event.id, user.id)
            .await?;
        let taken = event_repo.taken_seats(event.id).await?;
        if event.is_full(taken.saturating_sub(own_pending)) {
            return Err(AppError::Conflict("This event is sold out".to_string()));
        }

        let quote = CouponService::new(self.db)
            .quote(&event, coupon_code, now)
            .await?;

        if own_pending > 0 {
            ticket_repo
                .cancel_pending_for_user(event.id, user.id)
                .await?;
            tracing::info!(
                "Replaced {} unpaid tickets of user {} for event {}",
                own_pending,
                user.id,
                event.id
            );
        }

        if quote.amount_cents == 0 {
            self.issue_free(&event, user, quote).await
        } else {
            self.start_payment(&event, user, quote).await
        }
    }

    async fn issue_free(
        &self,
        event: &Event,
        user: &User,
        quote: Quote,
    ) -> Result<CheckoutOutcome, AppError> {
        let ticket_repo = TicketRepository::new(self.db);

        let ticket = ticket_repo
            .create(CreateTicketParams {
                event_id: event.id,
                user_id: user.id,
                status: TicketStatus::Issued,
                amount_paid_cents: 0,
                coupon_id: quote.coupon.as_ref().map(|coupon| coupon.id),
            })
            .await?;
        tracing::info!(
            "Issued free ticket {} for event {} to user {}",
            ticket.id,
            event.id,
            user.id
        );

        if let Some(coupon) = quote.coupon {
            CouponService::new(self.db).redeem(coupon.id).await;
        }

        FulfilmentService::new(self.db, self.integrations, self.app_url)
            .fulfil(&ticket)
            .await;

        // Re-read to pick up the QR url stored during fulfilment.
        let ticket = ticket_repo.find_by_id(ticket.id).await?.unwrap_or(ticket);

        Ok(CheckoutOutcome::Issued(ticket))
    }

    async fn start_payment(
        &self,
        event: &Event,
        user: &User,
        quote: Quote,
    ) -> Result<CheckoutOutcome, AppError> {
        let Some(stripe) = self.integrations.stripe.as_ref() else {
            return Err(AppError::InternalError(
                "Paid checkout requested but Stripe is not configured".to_string(),
            ));
        };

        let ticket_repo = TicketRepository::new(self.db);
        let ticket = ticket_repo
            .create(CreateTicketParams {
                event_id: event.id,
                user_id: user.id,
                status: TicketStatus::Pending,
                amount_paid_cents: quote.amount_cents,
                coupon_id: quote.coupon.as_ref().map(|coupon| coupon.id),
            })
            .await?;

        let session = stripe
            .create_payment_session(PaymentCheckout {
                product_name: format!("Ticket: {}", event.title),
                amount_cents: quote.amount_cents,
                customer_email: user.email.clone(),
                success_url: format!("{}/events/{}?checkout=success", self.app_url, event.slug),
                cancel_url: format!("{}/events/{}?checkout=cancelled", self.app_url, event.slug),
                metadata: vec![
                    ("kind", "ticket".to_string()),
                    ("ticket_id", ticket.id.to_string()),
                ],
            })
            .await;

        let session = match session {
            Ok(session) => session,
            Err(e) => {
                if let Err(delete_err) = ticket_repo.delete(ticket.id).await {
                    tracing::error!(
                        "Failed to remove pending ticket {} after Stripe error: {}",
                        ticket.id,
                        delete_err
                    );
                }
                return Err(e.into());
            }
        };

        ticket_repo.set_stripe_session(ticket.id, session.id).await?;
        tracing::info!(
            "Started payment for ticket {} ({} cents) for event {}",
            ticket.id,
            quote.amount_cents,
            event.id
        );

        Ok(CheckoutOutcome::PaymentRequired {
            ticket_id: ticket.id,
            checkout_url: session.url,
        })
    }
}
