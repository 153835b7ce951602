use crate::server::{
    data::post::PostRepository,
    model::{post::PostParams, PageParams},
};
use entity::sea_orm_active_enums::{PostKind, PublishStatus, TierLevel};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;

fn params(status: PublishStatus) -> PostParams {
    PostParams {
        kind: PostKind::Poetry,
        title: "Morning".to_string(),
        slug: "morning".to_string(),
        body_markdown: "Light on the *water*.".to_string(),
        excerpt: None,
        min_tier: TierLevel::Free,
        status,
    }
}
