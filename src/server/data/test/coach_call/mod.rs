use crate::server::{data::coach_call::CoachCallRepository, model::coach_call::CallSlot};
use chrono::{TimeZone, Utc};
use entity::sea_orm_active_enums::CoachCallStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod exists_in_window;
