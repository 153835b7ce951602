//! Blog, poetry and story posts.

use entity::sea_orm_active_enums::{PostKind, PublishStatus};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::post::PostRepository,
    error::AppError,
    model::{
        post::{PaginatedPosts, Post, PostParams},
        user::Viewer,
        PageParams,
    },
    util::validate::{require_non_blank, require_slug},
};

pub struct PostService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post authored by `author_id`. Publishing stamps `published_at`.
    pub async fn create(&self, params: PostParams, author_id: i32) -> Result<Post, AppError> {
        self.validate(&params, None).await?;

        let post = PostRepository::new(self.db).create(params, author_id).await?;
        tracing::info!("Created {:?} post {} ({})", post.kind, post.id, post.slug);

        Ok(post)
    }

    /// Updates a post. The first publish stamps `published_at`; later edits keep it.
    pub async fn update(&self, id: i32, params: PostParams) -> Result<Post, AppError> {
        self.validate(&params, Some(id)).await?;

        PostRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !PostRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Ok(())
    }

    pub async fn get_all(
        &self,
        page: PageParams,
        kind: Option<PostKind>,
    ) -> Result<PaginatedPosts, AppError> {
        Ok(PostRepository::new(self.db)
            .get_paginated(page, kind, false)
            .await?)
    }

    /// Published posts, newest first.
    pub async fn get_published(
        &self,
        page: PageParams,
        kind: Option<PostKind>,
    ) -> Result<PaginatedPosts, AppError> {
        Ok(PostRepository::new(self.db)
            .get_paginated(page, kind, true)
            .await?)
    }

    /// Published post the viewer's tier allows reading.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Unknown slug or not published
    /// - `Err(AppError::Forbidden)` - Tier too low
    pub async fn get_by_slug(&self, slug: &str, viewer: &Viewer) -> Result<Post, AppError> {
        let post = PostRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .filter(|post| post.status == PublishStatus::Published)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        if !viewer.can_access(post.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to read this post".to_string(),
            ));
        }

        Ok(post)
    }

    async fn validate(&self, params: &PostParams, except_id: Option<i32>) -> Result<(), AppError> {
        require_non_blank("title", &params.title)?;
        require_slug(&params.slug)?;

        if PostRepository::new(self.db)
            .slug_taken(&params.slug, except_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A post with slug '{}' already exists",
                params.slug
            )));
        }

        Ok(())
    }
}
