use crate::server::{data::ticket::TicketRepository, model::ticket::CreateTicketParams};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod cancel_pending_for_user;
mod cancel_stale_pending;
mod create;
mod user_has_live_ticket;
