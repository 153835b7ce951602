//! Program repository.

use chrono::Utc;
use entity::sea_orm_active_enums::PublishStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    program::{PaginatedPrograms, Program, ProgramParams},
    PageParams,
};

pub struct ProgramRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProgramRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: ProgramParams) -> Result<Program, DbErr> {
        let now = Utc::now();
        let entity = entity::program::ActiveModel {
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            cover_image_url: ActiveValue::Set(params.cover_image_url),
            min_tier: ActiveValue::Set(params.min_tier),
            status: ActiveValue::Set(params.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Program::from_entity(entity))
    }

    /// Replaces every editable field of a program.
    ///
    /// # Returns
    /// - `Ok(Some(Program))` - Updated program
    /// - `Ok(None)` - No program with that ID
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, id: i32, params: ProgramParams) -> Result<Option<Program>, DbErr> {
        let Some(entity) = entity::prelude::Program::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::program::ActiveModel = entity.into();
        active.title = ActiveValue::Set(params.title);
        active.slug = ActiveValue::Set(params.slug);
        active.description = ActiveValue::Set(params.description);
        active.cover_image_url = ActiveValue::Set(params.cover_image_url);
        active.min_tier = ActiveValue::Set(params.min_tier);
        active.status = ActiveValue::Set(params.status);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        Ok(Some(Program::from_entity(entity)))
    }

    /// Deletes a program, returning whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Program::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Program>, DbErr> {
        let entity = entity::prelude::Program::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Program::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Program>, DbErr> {
        let entity = entity::prelude::Program::find()
            .filter(entity::program::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Program::from_entity))
    }

    /// Whether another program already uses `slug`.
    ///
    /// # Arguments
    /// - `slug` - Slug to check
    /// - `except_id` - Program being updated, ignored in the check
    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Program::find().filter(entity::program::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(entity::program::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets programs with pagination, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page and page size
    /// - `published_only` - Restrict to published programs for public listings
    pub async fn get_paginated(
        &self,
        page: PageParams,
        published_only: bool,
    ) -> Result<PaginatedPrograms, DbErr> {
        let mut query = entity::prelude::Program::find();
        if published_only {
            query = query.filter(entity::program::Column::Status.eq(PublishStatus::Published));
        }

        let paginator = query
            .order_by_desc(entity::program::Column::CreatedAt)
            .order_by_desc(entity::program::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let programs = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Program::from_entity)
            .collect();

        Ok(PaginatedPrograms {
            programs,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }
}
