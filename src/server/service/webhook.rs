//! Stripe webhook handling.
//!
//! Deliveries are verified against the endpoint secret before anything is parsed.
//! Checkout sessions carry `metadata.kind` (`ticket` or `membership`) to route them.
//! Paid invoices renew the membership of their subscription. Other event types are
//! acknowledged and ignored.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    integration::{
        stripe::{verify_signature, CheckoutSessionObject, InvoiceObject, StripeEvent},
        Integrations,
    },
    model::ticket::Ticket,
    service::{
        coupon::CouponService, fulfilment::FulfilmentService, membership::MembershipService,
        ticket::TicketService,
    },
};

const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
const CHECKOUT_EXPIRED: &str = "checkout.session.expired";
const INVOICE_PAID: &str = "invoice.paid";

pub struct WebhookService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub app_url: &'a str,
}

impl<'a> WebhookService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, app_url: &'a str) -> Self {
        Self {
            db,
            integrations,
            app_url,
        }
    }

    /// Verifies and applies one Stripe delivery.
    ///
    /// # Arguments
    /// - `payload` - Raw request body
    /// - `signature` - `Stripe-Signature` header, if present
    /// - `now` - Current time, for the signature tolerance and activation dates
    ///
    /// # Returns
    /// - `Ok(())` - Applied or ignored
    /// - `Err(AppError::BadRequest)` - Missing or invalid signature, or unreadable payload
    pub async fn handle(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(secret) = self
            .integrations
            .stripe
            .as_ref()
            .and_then(|stripe| stripe.webhook_secret())
        else {
            return Err(AppError::BadRequest(
                "Webhook signing secret is not configured".to_string(),
            ));
        };

        let Some(signature) = signature else {
            return Err(AppError::BadRequest(
                "Missing Stripe-Signature header".to_string(),
            ));
        };

        verify_signature(payload, signature, secret, now.timestamp())
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {}", e)))?;

        match event.kind.as_str() {
            CHECKOUT_COMPLETED | CHECKOUT_EXPIRED => {
                let session: CheckoutSessionObject =
                    serde_json::from_value(event.data.object).map_err(|e| {
                        AppError::BadRequest(format!("Invalid checkout session: {}", e))
                    })?;
                let kind = session.metadata.get("kind").map(String::as_str);

                match (event.kind.as_str(), kind) {
                    (CHECKOUT_COMPLETED, Some("ticket")) => self.complete_ticket(&session).await,
                    (CHECKOUT_COMPLETED, Some("membership")) => {
                        MembershipService::new(self.db, self.integrations, self.app_url)
                            .complete_checkout(&session.id, session.subscription.as_deref(), now)
                            .await?;
                        Ok(())
                    }
                    (CHECKOUT_EXPIRED, Some("ticket")) => {
                        TicketService::new(self.db)
                            .expire_checkout(&session.id)
                            .await
                    }
                    (CHECKOUT_EXPIRED, Some("membership")) => {
                        MembershipService::new(self.db, self.integrations, self.app_url)
                            .expire_checkout(&session.id)
                            .await
                    }
                    (_, kind) => {
                        tracing::debug!(
                            "Ignoring {} for session {} with kind {:?}",
                            event.kind,
                            session.id,
                            kind
                        );
                        Ok(())
                    }
                }
            }
            INVOICE_PAID => {
                let invoice: InvoiceObject = serde_json::from_value(event.data.object)
                    .map_err(|e| AppError::BadRequest(format!("Invalid invoice: {}", e)))?;
                self.renew_membership(&invoice, now).await
            }
            other => {
                tracing::debug!("Ignoring Stripe event {} of type {}", event.id, other);
                Ok(())
            }
        }
    }

    /// Extends the membership behind a paid subscription invoice.
    async fn renew_membership(
        &self,
        invoice: &InvoiceObject,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(subscription_id) = invoice.subscription_id() else {
            tracing::debug!("Ignoring invoice {} without a subscription", invoice.id);
            return Ok(());
        };

        if invoice.is_subscription_start() {
            tracing::debug!(
                "Invoice {} opens subscription {}, covered by checkout completion",
                invoice.id,
                subscription_id
            );
            return Ok(());
        }

        MembershipService::new(self.db, self.integrations, self.app_url)
            .renew_subscription(subscription_id, invoice.paid_through(), now)
            .await?;

        Ok(())
    }

    /// Issues the ticket paid for in `session`. Already issued tickets are left alone.
    async fn complete_ticket(&self, session: &CheckoutSessionObject) -> Result<(), AppError> {
        let repo = TicketRepository::new(self.db);

        let Some(ticket) = self.find_session_ticket(session).await? else {
            tracing::warn!("No ticket found for checkout session {}", session.id);
            return Ok(());
        };

        match ticket.status {
            TicketStatus::Issued | TicketStatus::CheckedIn => {
                tracing::debug!("Ticket {} already issued", ticket.id);
                return Ok(());
            }
            TicketStatus::Cancelled => {
                if repo
                    .user_has_live_ticket(ticket.event_id, ticket.user_id)
                    .await?
                {
                    tracing::warn!(
                        "Payment completed for replaced ticket {} but user {} already holds a ticket for event {}, not issuing",
                        ticket.id,
                        ticket.user_id,
                        ticket.event_id
                    );
                    return Ok(());
                }
                tracing::warn!(
                    "Payment completed for cancelled ticket {}, issuing it",
                    ticket.id
                );
            }
            TicketStatus::Pending => {}
        }

        let amount = session.amount_total.unwrap_or(ticket.amount_paid_cents);
        let Some(issued) = repo.issue(ticket.id, amount).await? else {
            tracing::debug!("Ticket {} was issued by another delivery", ticket.id);
            return Ok(());
        };
        tracing::info!("Issued paid ticket {} ({} cents)", issued.id, amount);

        if let Some(coupon_id) = issued.coupon_id {
            CouponService::new(self.db).redeem(coupon_id).await;
        }

        FulfilmentService::new(self.db, self.integrations, self.app_url)
            .fulfil(&issued)
            .await;

        Ok(())
    }

    async fn find_session_ticket(
        &self,
        session: &CheckoutSessionObject,
    ) -> Result<Option<Ticket>, AppError> {
        let repo = TicketRepository::new(self.db);

        if let Some(ticket) = repo.find_by_session(&session.id).await? {
            return Ok(Some(ticket));
        }

        let Some(ticket_id) = session
            .metadata
            .get("ticket_id")
            .and_then(|id| id.parse::<i32>().ok())
        else {
            return Ok(None);
        };

        Ok(repo.find_by_id(ticket_id).await?)
    }
}
