use crate::server::{
    data::program::ProgramRepository,
    model::{program::ProgramParams, PageParams},
};
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod slug_taken;

fn params(slug: &str) -> ProgramParams {
    ProgramParams {
        title: "Strength Foundations".to_string(),
        slug: slug.to_string(),
        description: "Build a base.".to_string(),
        cover_image_url: None,
        min_tier: TierLevel::Pro,
        status: PublishStatus::Draft,
    }
}
