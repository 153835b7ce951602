use entity::sea_orm_active_enums::PublishStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::program::ProgramRepository,
    error::AppError,
    model::{
        program::{PaginatedPrograms, Program, ProgramParams},
        user::Viewer,
        PageParams,
    },
    util::validate::{require_http_url, require_non_blank, require_slug},
};

pub struct ProgramService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> ProgramService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a program.
    ///
    /// # Returns
    /// - `Ok(Program)` - Created program
    /// - `Err(AppError::BadRequest)` - Missing title, invalid slug or cover URL
    /// - `Err(AppError::Conflict)` - Slug already used
    pub async fn create(&self, params: ProgramParams) -> Result<Program, AppError> {
        self.validate(&params, None).await?;

        let program = ProgramRepository::new(self.db).create(params).await?;
        tracing::info!("Created program {} ({})", program.id, program.slug);

        Ok(program)
    }

    pub async fn update(&self, id: i32, params: ProgramParams) -> Result<Program, AppError> {
        self.validate(&params, Some(id)).await?;

        ProgramRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Program not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ProgramRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Program not found".to_string()));
        }
        Ok(())
    }

    /// All programs regardless of status, for the admin panel.
    pub async fn get_all(&self, page: PageParams) -> Result<PaginatedPrograms, AppError> {
        Ok(ProgramRepository::new(self.db)
            .get_paginated(page, false)
            .await?)
    }

    /// Published programs, including ones the viewer cannot open yet.
    pub async fn get_published(&self, page: PageParams) -> Result<PaginatedPrograms, AppError> {
        Ok(ProgramRepository::new(self.db)
            .get_paginated(page, true)
            .await?)
    }

    /// Published program detail.
    ///
    /// # Returns
    /// - `Ok(Program)` - Program the viewer may read
    /// - `Err(AppError::NotFound)` - Unknown slug or not published
    /// - `Err(AppError::Forbidden)` - Viewer's tier is below the program's tier
    pub async fn get_by_slug(&self, slug: &str, viewer: &Viewer) -> Result<Program, AppError> {
        let program = ProgramRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .filter(|program| program.status == PublishStatus::Published)
            .ok_or_else(|| AppError::NotFound("Program not found".to_string()))?;

        if !viewer.can_access(program.min_tier) {
            return Err(AppError::Forbidden(
                "Upgrade your membership to access this program".to_string(),
            ));
        }

        Ok(program)
    }

    async fn validate(&self, params: &ProgramParams, except_id: Option<i32>) -> Result<(), AppError> {
        require_non_blank("title", &params.title)?;
        require_slug(&params.slug)?;
        if let Some(url) = params.cover_image_url.as_deref() {
            require_http_url("cover_image_url", url)?;
        }

        if ProgramRepository::new(self.db)
            .slug_taken(&params.slug, except_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A program with slug '{}' already exists",
                params.slug
            )));
        }

        Ok(())
    }
}
