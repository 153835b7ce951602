use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct QuestionDto {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct QuestionnaireDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionDto>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct QuestionnaireFormDto {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct SubmitResponseDto {
    /// Answers keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct QuestionnaireResponseDto {
    pub id: i32,
    pub questionnaire_id: i32,
    pub user_id: i32,
    pub answers: HashMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}
