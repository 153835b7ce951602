use super::{domain_user, viewer};
use crate::server::{error::AppError, service::event::EventService};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{EventStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};

mod rsvp;
