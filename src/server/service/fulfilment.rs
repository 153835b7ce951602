//! Post-issue ticket fulfilment.
//!
//! After a ticket is issued its QR code is rendered, uploaded to blob storage and linked
//! on the ticket, then the holder is emailed and sent a Discord DM. Every step is best
//! effort: a failure is logged and the remaining steps still run. Nothing here touches
//! the ticket's status.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{event::EventRepository, ticket::TicketRepository, user::UserRepository},
    error::AppError,
    integration::{email::EmailMessage, qr, Integrations},
    model::{event::Event, ticket::Ticket, user::User},
};

/// What fulfilment managed to do for one ticket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FulfilmentReport {
    pub qr_url: Option<String>,
    pub emailed: bool,
    pub messaged: bool,
}

pub struct FulfilmentService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub app_url: &'a str,
}

impl<'a> FulfilmentService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, app_url: &'a str) -> Self {
        Self {
            db,
            integrations,
            app_url,
        }
    }

    /// Link encoded in the ticket's QR code, opened by door staff to check the ticket.
    pub fn verify_url(&self, ticket: &Ticket) -> String {
        format!("{}/tickets/verify/{}", self.app_url, ticket.code)
    }

    /// Runs every fulfilment step for an issued ticket. Never fails.
    pub async fn fulfil(&self, ticket: &Ticket) -> FulfilmentReport {
        let mut report = FulfilmentReport::default();

        let (event, user) = match self.load_context(ticket).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!("Skipping fulfilment of ticket {}: {}", ticket.id, e);
                return report;
            }
        };

        report.qr_url = self.store_qr(ticket).await;
        report.emailed = self
            .send_email(ticket, &event, &user, report.qr_url.as_deref())
            .await;
        report.messaged = self.send_dm(ticket, &event, &user).await;

        tracing::info!(
            "Fulfilled ticket {} (qr: {}, email: {}, dm: {})",
            ticket.id,
            report.qr_url.is_some(),
            report.emailed,
            report.messaged
        );

        report
    }

    async fn load_context(&self, ticket: &Ticket) -> Result<(Event, User), AppError> {
        let event = EventRepository::new(self.db)
            .find_by_id(ticket.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", ticket.event_id)))?;
        let user = UserRepository::new(self.db)
            .find_by_id(ticket.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", ticket.user_id)))?;

        Ok((event, user))
    }

    async fn store_qr(&self, ticket: &Ticket) -> Option<String> {
        let Some(blob) = self.integrations.blob.as_ref() else {
            tracing::debug!("Blob storage disabled, skipping QR upload for ticket {}", ticket.id);
            return None;
        };

        let svg = match qr::render_svg(&self.verify_url(ticket)) {
            Ok(svg) => svg,
            Err(e) => {
                tracing::warn!("Failed to render QR for ticket {}: {}", ticket.id, e);
                return None;
            }
        };

        let url = match blob
            .put(&format!("tickets/{}.svg", ticket.code), svg, "image/svg+xml")
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Failed to upload QR for ticket {}: {}", ticket.id, e);
                return None;
            }
        };

        if let Err(e) = TicketRepository::new(self.db)
            .set_qr_url(ticket.id, url.clone())
            .await
        {
            tracing::warn!("Failed to store QR url for ticket {}: {}", ticket.id, e);
            return None;
        }

        Some(url)
    }

    async fn send_email(
        &self,
        ticket: &Ticket,
        event: &Event,
        user: &User,
        qr_url: Option<&str>,
    ) -> bool {
        let Some(email) = self.integrations.email.as_ref() else {
            tracing::debug!("Email disabled, skipping confirmation for ticket {}", ticket.id);
            return false;
        };
        let Some(to) = user.email.clone() else {
            tracing::debug!("User {} has no email, skipping confirmation", user.id);
            return false;
        };

        let qr_block = match qr_url {
            Some(url) => format!(r#"<p><img src="{}" alt="Ticket QR code" width="256"/></p>"#, url),
            None => String::new(),
        };
        let html = format!(
            "<h1>You're going to {title}</h1>\
             <p>{starts}{location}</p>\
             <p>Ticket code: <strong>{code}</strong></p>\
             {qr_block}\
             <p><a href=\"{verify}\">View your ticket</a></p>",
            title = event.title,
            starts = event.starts_at.format("%A %-d %B %Y, %H:%M UTC"),
            location = event
                .location
                .as_deref()
                .map(|location| format!(" at {}", location))
                .unwrap_or_default(),
            code = ticket.code,
            qr_block = qr_block,
            verify = self.verify_url(ticket),
        );

        match email
            .send(EmailMessage {
                to,
                subject: format!("Your ticket for {}", event.title),
                html,
            })
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to email ticket {}: {}", ticket.id, e);
                false
            }
        }
    }

    async fn send_dm(&self, ticket: &Ticket, event: &Event, user: &User) -> bool {
        let Some(discord) = self.integrations.discord.as_ref() else {
            tracing::debug!("Discord disabled, skipping DM for ticket {}", ticket.id);
            return false;
        };
        let Some(member_id) = user.discord_snowflake() else {
            tracing::warn!("User {} has a non-numeric Discord id", user.id);
            return false;
        };

        let content = format!(
            "Your ticket for **{}** is confirmed. Code: `{}`\n{}",
            event.title,
            ticket.code,
            self.verify_url(ticket)
        );

        match discord.send_dm(member_id, &content).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to DM ticket {} to user {}: {}", ticket.id, user.id, e);
                false
            }
        }
    }
}
