use crate::server::{
    data::channel::ChannelRepository,
    model::channel::{ChannelParams, VideoParams},
};
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_videos;
