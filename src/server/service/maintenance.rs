//! Periodic cleanup run by the scheduler.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    integration::Integrations,
    service::{membership::MembershipService, ticket::TicketService},
};

/// What one maintenance pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub cancelled_tickets: u64,
    pub expired_memberships: usize,
}

pub struct MaintenanceService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub app_url: &'a str,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, app_url: &'a str) -> Self {
        Self {
            db,
            integrations,
            app_url,
        }
    }

    /// Releases seats held by abandoned checkouts and expires lapsed memberships.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<MaintenanceReport, AppError> {
        let cancelled_tickets = TicketService::new(self.db).cancel_stale_pending(now).await?;
        let expired_memberships = MembershipService::new(self.db, self.integrations, self.app_url)
            .expire_due(now)
            .await?;

        Ok(MaintenanceReport {
            cancelled_tickets,
            expired_memberships,
        })
    }
}
