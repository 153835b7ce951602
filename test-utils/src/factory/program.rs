//! Program factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for programs. Defaults to a published free program.
pub struct ProgramFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    min_tier: TierLevel,
    status: PublishStatus,
}

impl<'a> ProgramFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Program {}", id),
            slug: format!("program-{}", id),
            min_tier: TierLevel::Free,
            status: PublishStatus::Published,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
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

    pub async fn build(self) -> Result<entity::program::Model, DbErr> {
        let now = Utc::now();
        entity::program::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set("Eight weeks of structured training.".to_string()),
            cover_image_url: ActiveValue::Set(None),
            min_tier: ActiveValue::Set(self.min_tier),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_program(db: &DatabaseConnection) -> Result<entity::program::Model, DbErr> {
    ProgramFactory::new(db).build().await
}
