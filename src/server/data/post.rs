//! Post repository.
//!
//! A post gets its `published_at` the first time it is saved as published and keeps it
//! through later edits.

use chrono::Utc;
use entity::sea_orm_active_enums::{PostKind, PublishStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    post::{PaginatedPosts, Post, PostParams},
    PageParams,
};

pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: PostParams, author_id: i32) -> Result<Post, DbErr> {
        let now = Utc::now();
        let published_at = (params.status == PublishStatus::Published).then_some(now);

        let entity = entity::post::ActiveModel {
            kind: ActiveValue::Set(params.kind),
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            body_markdown: ActiveValue::Set(params.body_markdown),
            excerpt: ActiveValue::Set(params.excerpt),
            min_tier: ActiveValue::Set(params.min_tier),
            status: ActiveValue::Set(params.status),
            author_id: ActiveValue::Set(Some(author_id)),
            published_at: ActiveValue::Set(published_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Post::from_entity(entity))
    }

    pub async fn update(&self, id: i32, params: PostParams) -> Result<Option<Post>, DbErr> {
        let Some(entity) = entity::prelude::Post::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let published_at = match entity.published_at {
            Some(at) => Some(at),
            None => (params.status == PublishStatus::Published).then_some(now),
        };

        let mut active: entity::post::ActiveModel = entity.into();
        active.kind = ActiveValue::Set(params.kind);
        active.title = ActiveValue::Set(params.title);
        active.slug = ActiveValue::Set(params.slug);
        active.body_markdown = ActiveValue::Set(params.body_markdown);
        active.excerpt = ActiveValue::Set(params.excerpt);
        active.min_tier = ActiveValue::Set(params.min_tier);
        active.status = ActiveValue::Set(params.status);
        active.published_at = ActiveValue::Set(published_at);
        active.updated_at = ActiveValue::Set(now);
        let entity = active.update(self.db).await?;

        Ok(Some(Post::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Post::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DbErr> {
        let entity = entity::prelude::Post::find()
            .filter(entity::post::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Post::from_entity))
    }

    pub async fn slug_taken(&self, slug: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Post::find().filter(entity::post::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            query = query.filter(entity::post::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets posts with pagination.
    ///
    /// Public listings (`published_only`) are ordered newest publication first; admin
    /// listings by last edit.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page and page size
    /// - `kind` - Restrict to one kind of post
    /// - `published_only` - Restrict to published posts
    pub async fn get_paginated(
        &self,
        page: PageParams,
        kind: Option<PostKind>,
        published_only: bool,
    ) -> Result<PaginatedPosts, DbErr> {
        let mut query = entity::prelude::Post::find();
        if let Some(kind) = kind {
            query = query.filter(entity::post::Column::Kind.eq(kind));
        }
        query = if published_only {
            query
                .filter(entity::post::Column::Status.eq(PublishStatus::Published))
                .order_by_desc(entity::post::Column::PublishedAt)
        } else {
            query.order_by_desc(entity::post::Column::UpdatedAt)
        };

        let paginator = query
            .order_by_desc(entity::post::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let posts = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Post::from_entity)
            .collect();

        Ok(PaginatedPosts {
            posts,
            total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(total),
        })
    }
}
