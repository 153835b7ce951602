//! Post factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{PostKind, PublishStatus, TierLevel};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for posts. Defaults to a published free blog post.
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    kind: PostKind,
    title: String,
    slug: String,
    body_markdown: String,
    min_tier: TierLevel,
    status: PublishStatus,
}

impl<'a> PostFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            kind: PostKind::Blog,
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            body_markdown: "# Hello\n\nFirst *post*.".to_string(),
            min_tier: TierLevel::Free,
            status: PublishStatus::Published,
        }
    }

    pub fn kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body_markdown = body.into();
        self
    }

    pub fn min_tier(mut self, min_tier: TierLevel) -> Self {
        self.min_tier = min_tier;
        self
    }

    pub fn status(mut self, status: PublishStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::post::Model, DbErr> {
        let now = Utc::now();
        let published_at = match self.status {
            PublishStatus::Published => Some(now),
            _ => None,
        };

        entity::post::ActiveModel {
            kind: ActiveValue::Set(self.kind),
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            body_markdown: ActiveValue::Set(self.body_markdown),
            excerpt: ActiveValue::Set(None),
            min_tier: ActiveValue::Set(self.min_tier),
            status: ActiveValue::Set(self.status),
            author_id: ActiveValue::Set(None),
            published_at: ActiveValue::Set(published_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_post(db: &DatabaseConnection) -> Result<entity::post::Model, DbErr> {
    PostFactory::new(db).build().await
}
