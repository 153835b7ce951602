use super::domain_user;
use crate::server::{data::ticket::TicketRepository, error::AppError, service::ticket::TicketService};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use test_utils::{builder::TestBuilder, factory};

mod check_in;
