use super::{domain_user, viewer};
use crate::server::{
    error::AppError,
    integration::Integrations,
    model::{channel::VideoParams, post::PostParams, PageParams},
    service::{channel::ChannelService, post::PostService, program::ProgramService},
};
use entity::sea_orm_active_enums::{PostKind, PublishStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};

mod channel;
mod post;
mod program;
