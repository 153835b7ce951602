use crate::server::{
    data::user::UserRepository,
    model::{user::UpsertUserParam, PageParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_discord_id;
mod get_all_paginated;
mod upsert;
