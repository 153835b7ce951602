use crate::server::{data::coupon::CouponRepository, model::coupon::CouponParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod increment_redemption;
