//! Program domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PublishStatus, TierLevel};

use crate::{
    model::program::{
        PaginatedProgramsDto, ProgramDto, ProgramFormDto, ProgramSummaryDto, PublishStatusDto,
    },
    server::model::user::Viewer,
};

impl From<PublishStatus> for PublishStatusDto {
    fn from(value: PublishStatus) -> Self {
        match value {
            PublishStatus::Draft => PublishStatusDto::Draft,
            PublishStatus::Published => PublishStatusDto::Published,
            PublishStatus::Archived => PublishStatusDto::Archived,
        }
    }
}

impl From<PublishStatusDto> for PublishStatus {
    fn from(value: PublishStatusDto) -> Self {
        match value {
            PublishStatusDto::Draft => PublishStatus::Draft,
            PublishStatusDto::Published => PublishStatus::Published,
            PublishStatusDto::Archived => PublishStatus::Archived,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub min_tier: TierLevel,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Program {
    pub fn from_entity(entity: entity::program::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            cover_image_url: entity.cover_image_url,
            min_tier: entity.min_tier,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ProgramDto {
        ProgramDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            cover_image_url: self.cover_image_url,
            min_tier: self.min_tier.into(),
            status: self.status.into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_summary_dto(self, viewer: &Viewer) -> ProgramSummaryDto {
        ProgramSummaryDto {
            locked: !viewer.can_access(self.min_tier),
            id: self.id,
            title: self.title,
            slug: self.slug,
            cover_image_url: self.cover_image_url,
            min_tier: self.min_tier.into(),
        }
    }
}

/// Fields for creating or replacing a program.
#[derive(Debug, Clone)]
pub struct ProgramParams {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub min_tier: TierLevel,
    pub status: PublishStatus,
}

impl ProgramParams {
    pub fn from_dto(dto: ProgramFormDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            description: dto.description,
            cover_image_url: dto.cover_image_url.filter(|url| !url.trim().is_empty()),
            min_tier: dto.min_tier.into(),
            status: dto.status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedPrograms {
    pub programs: Vec<Program>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedPrograms {
    pub fn into_dto(self, viewer: &Viewer) -> PaginatedProgramsDto {
        PaginatedProgramsDto {
            programs: self
                .programs
                .into_iter()
                .map(|p| p.into_summary_dto(viewer))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
