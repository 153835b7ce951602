use super::{domain_user, viewer, with_stripe, APP_URL};
use crate::server::{
    data::{coupon::CouponRepository, event::EventRepository, ticket::TicketRepository},
    error::AppError,
    integration::Integrations,
    model::ticket::CheckoutOutcome,
    service::checkout::CheckoutService,
};
use chrono::Utc;
use entity::sea_orm_active_enums::{TicketStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

mod paid;
mod rejections;
