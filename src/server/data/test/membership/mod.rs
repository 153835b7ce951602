use crate::server::{data::membership::MembershipRepository, model::membership::UpdateTierParams};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod activate;
mod cancel_other_active;
mod effective_tier;
mod expire_due;
mod tier_role_for_user;
mod tiers;
