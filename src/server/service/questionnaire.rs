//! Questionnaires and member submissions.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::questionnaire::QuestionnaireRepository,
    error::AppError,
    model::questionnaire::{Questionnaire, QuestionnaireParams, QuestionnaireResponse},
};

pub struct QuestionnaireService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> QuestionnaireService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: QuestionnaireParams) -> Result<Questionnaire, AppError> {
        params
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let questionnaire = QuestionnaireRepository::new(self.db).create(params).await?;
        tracing::info!(
            "Created questionnaire {} with {} questions",
            questionnaire.id,
            questionnaire.questions.len()
        );

        Ok(questionnaire)
    }

    pub async fn update(
        &self,
        id: i32,
        params: QuestionnaireParams,
    ) -> Result<Questionnaire, AppError> {
        params
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        QuestionnaireRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Questionnaire not found".to_string()))
    }

    /// Deletes a questionnaire together with its responses.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !QuestionnaireRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Questionnaire not found".to_string()));
        }
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Questionnaire>, AppError> {
        Ok(QuestionnaireRepository::new(self.db).get_all().await?)
    }

    /// Active questionnaires, as offered to members.
    pub async fn get_active_list(&self) -> Result<Vec<Questionnaire>, AppError> {
        let mut questionnaires = QuestionnaireRepository::new(self.db).get_all().await?;
        questionnaires.retain(|q| q.active);
        Ok(questionnaires)
    }

    /// An active questionnaire. Inactive ones are reported as missing.
    pub async fn get_active(&self, id: i32) -> Result<Questionnaire, AppError> {
        QuestionnaireRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|q| q.active)
            .ok_or_else(|| AppError::NotFound("Questionnaire not found".to_string()))
    }

    /// Stores a member's answers.
    ///
    /// # Returns
    /// - `Ok(QuestionnaireResponse)` - Stored response
    /// - `Err(AppError::NotFound)` - Unknown or inactive questionnaire
    /// - `Err(AppError::BadRequest)` - Unknown question ids or missing required answers
    pub async fn submit(
        &self,
        id: i32,
        user_id: i32,
        answers: HashMap<String, String>,
    ) -> Result<QuestionnaireResponse, AppError> {
        let questionnaire = self.get_active(id).await?;
        questionnaire
            .validate_answers(&answers)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let response = QuestionnaireRepository::new(self.db)
            .create_response(questionnaire.id, user_id, answers)
            .await?;
        tracing::info!(
            "User {} answered questionnaire {}",
            user_id,
            questionnaire.id
        );

        Ok(response)
    }

    pub async fn get_responses(&self, id: i32) -> Result<Vec<QuestionnaireResponse>, AppError> {
        let repo = QuestionnaireRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Questionnaire not found".to_string()));
        }

        Ok(repo.get_responses(id).await?)
    }
}
