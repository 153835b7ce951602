//! Coach-assigned personalized programs and their generated checklists.
//!
//! The checklist is regenerated whenever the dates, training days or tasks change.
//! Items surviving a regeneration keep their completion.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{personalized_program::PersonalizedProgramRepository, user::UserRepository},
    error::AppError,
    model::personalized_program::{ChecklistItem, PersonalizedProgram, PersonalizedProgramParams},
    util::validate::require_non_blank,
};

pub struct PersonalizedProgramService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> PersonalizedProgramService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a program for a member and generates its checklist.
    ///
    /// # Returns
    /// - `Ok((PersonalizedProgram, Vec<ChecklistItem>))` - Program and its checklist
    /// - `Err(AppError::BadRequest)` - Blank title or unusable schedule
    /// - `Err(AppError::NotFound)` - Unknown member
    pub async fn create(
        &self,
        params: PersonalizedProgramParams,
    ) -> Result<(PersonalizedProgram, Vec<ChecklistItem>), AppError> {
        self.validate(&params).await?;
        let planned = params
            .plan()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let repo = PersonalizedProgramRepository::new(self.db);
        let program = repo.create(params, planned).await?;
        let items = repo.get_items(program.id).await?;
        tracing::info!(
            "Created personalized program {} for user {} with {} checklist items",
            program.id,
            program.user_id,
            items.len()
        );

        Ok((program, items))
    }

    /// Updates a program, regenerating the checklist only when the schedule changed.
    pub async fn update(
        &self,
        id: i32,
        params: PersonalizedProgramParams,
    ) -> Result<(PersonalizedProgram, Vec<ChecklistItem>), AppError> {
        self.validate(&params).await?;

        let repo = PersonalizedProgramRepository::new(self.db);
        let existing = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personalized program not found".to_string()))?;

        let planned = if existing.schedule_changed(&params) {
            Some(
                params
                    .plan()
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            )
        } else {
            None
        };

        let regenerated = planned.is_some();
        let program = repo
            .update(id, params, planned)
            .await?
            .ok_or_else(|| AppError::NotFound("Personalized program not found".to_string()))?;

        let items = repo.get_items(id).await?;
        if regenerated {
            tracing::info!(
                "Regenerated checklist of personalized program {} ({} items)",
                id,
                items.len()
            );
        }

        Ok((program, items))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !PersonalizedProgramRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(
                "Personalized program not found".to_string(),
            ));
        }
        Ok(())
    }

    /// Programs with their checklists, optionally for one member.
    pub async fn get_all(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<(PersonalizedProgram, Vec<ChecklistItem>)>, AppError> {
        let repo = PersonalizedProgramRepository::new(self.db);

        let mut programs = Vec::new();
        for program in repo.get_all(user_id).await? {
            let items = repo.get_items(program.id).await?;
            programs.push((program, items));
        }

        Ok(programs)
    }

    /// One of the member's own programs with its checklist.
    ///
    /// Programs of other members are reported as missing.
    pub async fn get_mine(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<(PersonalizedProgram, Vec<ChecklistItem>), AppError> {
        let repo = PersonalizedProgramRepository::new(self.db);

        let program = repo
            .find_by_id(id)
            .await?
            .filter(|program| program.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Personalized program not found".to_string()))?;
        let items = repo.get_items(program.id).await?;

        Ok((program, items))
    }

    /// Marks a checklist item done or not done.
    ///
    /// # Returns
    /// - `Ok(ChecklistItem)` - Updated item
    /// - `Err(AppError::NotFound)` - Unknown item, or it belongs to another member
    pub async fn set_item_completed(
        &self,
        item_id: i32,
        user_id: i32,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Result<ChecklistItem, AppError> {
        let repo = PersonalizedProgramRepository::new(self.db);

        let item = repo
            .find_item_for_user(item_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checklist item not found".to_string()))?;

        // Re-completing keeps the original time.
        let completed_at = match (completed, item.completed_at) {
            (true, Some(at)) => Some(at),
            (true, None) => Some(now),
            (false, _) => None,
        };

        repo.set_item_completed(item.id, completed_at)
            .await?
            .ok_or_else(|| AppError::NotFound("Checklist item not found".to_string()))
    }

    async fn validate(&self, params: &PersonalizedProgramParams) -> Result<(), AppError> {
        require_non_blank("title", &params.title)?;

        if UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                params.user_id
            )));
        }

        Ok(())
    }
}
