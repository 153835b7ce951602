//! Questionnaires and submitted responses.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::questionnaire::{
    QuestionDto, QuestionnaireDto, QuestionnaireFormDto, QuestionnaireResponseDto,
};

/// One question, stored inside the questionnaire's JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    pub fn from_dto(dto: QuestionDto) -> Self {
        Self {
            id: dto.id.trim().to_string(),
            prompt: dto.prompt.trim().to_string(),
            required: dto.required,
        }
    }

    pub fn into_dto(self) -> QuestionDto {
        QuestionDto {
            id: self.id,
            prompt: self.prompt,
            required: self.required,
        }
    }
}

/// Reason a questionnaire or a set of answers was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Every question needs an id and a prompt")]
    IncompleteQuestion,
    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),
    #[error("Unknown question ids: {}", .0.join(", "))]
    UnknownQuestions(Vec<String>),
    #[error("Missing answers for: {}", .0.join(", "))]
    MissingAnswers(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Questionnaire {
    pub fn from_entity(entity: entity::questionnaire::Model) -> Result<Self, serde_json::Error> {
        Ok(Self {
            questions: serde_json::from_value(entity.questions)?,
            id: entity.id,
            title: entity.title,
            description: entity.description,
            active: entity.active,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> QuestionnaireDto {
        QuestionnaireDto {
            id: self.id,
            title: self.title,
            description: self.description,
            questions: self.questions.into_iter().map(Question::into_dto).collect(),
            active: self.active,
            created_at: self.created_at,
        }
    }

    /// Checks a set of answers against the questions.
    ///
    /// Every answer must belong to a known question and every required question needs a
    /// non-blank answer.
    ///
    /// # Returns
    /// - `Ok(())` - Answers are complete
    /// - `Err(QuestionnaireError)` - Unknown question ids or missing required answers
    pub fn validate_answers(
        &self,
        answers: &HashMap<String, String>,
    ) -> Result<(), QuestionnaireError> {
        let known: HashSet<&str> = self.questions.iter().map(|q| q.id.as_str()).collect();

        let mut unknown: Vec<String> = answers
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(QuestionnaireError::UnknownQuestions(unknown));
        }

        let missing: Vec<String> = self
            .questions
            .iter()
            .filter(|q| q.required)
            .filter(|q| {
                answers
                    .get(&q.id)
                    .is_none_or(|answer| answer.trim().is_empty())
            })
            .map(|q| q.id.clone())
            .collect();
        if !missing.is_empty() {
            return Err(QuestionnaireError::MissingAnswers(missing));
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct QuestionnaireParams {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub active: bool,
}

impl QuestionnaireParams {
    pub fn from_dto(dto: QuestionnaireFormDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            questions: dto.questions.into_iter().map(Question::from_dto).collect(),
            active: dto.active,
        }
    }

    /// Checks that the title is set and that question ids and prompts are present and ids unique.
    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        if self.title.is_empty() {
            return Err(QuestionnaireError::MissingTitle);
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.id.is_empty() || question.prompt.is_empty() {
                return Err(QuestionnaireError::IncompleteQuestion);
            }
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionnaireError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireResponse {
    pub id: i32,
    pub questionnaire_id: i32,
    pub user_id: i32,
    pub answers: HashMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

impl QuestionnaireResponse {
    pub fn from_entity(
        entity: entity::questionnaire_response::Model,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            answers: serde_json::from_value(entity.answers)?,
            id: entity.id,
            questionnaire_id: entity.questionnaire_id,
            user_id: entity.user_id,
            submitted_at: entity.submitted_at,
        })
    }

    pub fn into_dto(self) -> QuestionnaireResponseDto {
        QuestionnaireResponseDto {
            id: self.id,
            questionnaire_id: self.questionnaire_id,
            user_id: self.user_id,
            answers: self.answers,
            submitted_at: self.submitted_at,
        }
    }
}
