use super::{domain_user, with_stripe, APP_URL};
use crate::server::{
    data::membership::MembershipRepository,
    error::AppError,
    integration::Integrations,
    model::membership::GrantMembershipParams,
    service::membership::MembershipService,
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

mod cancel;
mod checkout;
mod renew;
