//! Blog, poetry and story posts.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{PostKind, PublishStatus, TierLevel};
use pulldown_cmark::{html, Options, Parser};

use crate::{
    model::post::{PaginatedPostsDto, PostDto, PostFormDto, PostKindDto, PostSummaryDto},
    server::model::user::Viewer,
};

impl From<PostKind> for PostKindDto {
    fn from(value: PostKind) -> Self {
        match value {
            PostKind::Blog => PostKindDto::Blog,
            PostKind::Poetry => PostKindDto::Poetry,
            PostKind::Story => PostKindDto::Story,
        }
    }
}

impl From<PostKindDto> for PostKind {
    fn from(value: PostKindDto) -> Self {
        match value {
            PostKindDto::Blog => PostKind::Blog,
            PostKindDto::Poetry => PostKind::Poetry,
            PostKindDto::Story => PostKind::Story,
        }
    }
}

/// Renders a markdown body to HTML with every pulldown-cmark extension enabled.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all());

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub kind: PostKind,
    pub title: String,
    pub slug: String,
    pub body_markdown: String,
    pub excerpt: Option<String>,
    pub min_tier: TierLevel,
    pub status: PublishStatus,
    pub author_id: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn from_entity(entity: entity::post::Model) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            title: entity.title,
            slug: entity.slug,
            body_markdown: entity.body_markdown,
            excerpt: entity.excerpt,
            min_tier: entity.min_tier,
            status: entity.status,
            author_id: entity.author_id,
            published_at: entity.published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts to a DTO carrying both the markdown source and its rendered HTML.
    pub fn into_dto(self) -> PostDto {
        PostDto {
            body_html: render_markdown(&self.body_markdown),
            id: self.id,
            kind: self.kind.into(),
            title: self.title,
            slug: self.slug,
            body_markdown: self.body_markdown,
            excerpt: self.excerpt,
            min_tier: self.min_tier.into(),
            status: self.status.into(),
            author_id: self.author_id,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_summary_dto(self, viewer: &Viewer) -> PostSummaryDto {
        PostSummaryDto {
            locked: !viewer.can_access(self.min_tier),
            id: self.id,
            kind: self.kind.into(),
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            min_tier: self.min_tier.into(),
            published_at: self.published_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostParams {
    pub kind: PostKind,
    pub title: String,
    pub slug: String,
    pub body_markdown: String,
    pub excerpt: Option<String>,
    pub min_tier: TierLevel,
    pub status: PublishStatus,
}

impl PostParams {
    pub fn from_dto(dto: PostFormDto) -> Self {
        Self {
            kind: dto.kind.into(),
            title: dto.title.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            body_markdown: dto.body_markdown,
            excerpt: dto.excerpt.filter(|e| !e.trim().is_empty()),
            min_tier: dto.min_tier.into(),
            status: dto.status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedPosts {
    pub posts: Vec<Post>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedPosts {
    pub fn into_dto(self, viewer: &Viewer) -> PaginatedPostsDto {
        PaginatedPostsDto {
            posts: self
                .posts
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
