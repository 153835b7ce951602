use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
    },
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};

mod require;
