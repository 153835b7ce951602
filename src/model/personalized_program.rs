use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PersonalizedProgramStatusDto {
    Active,
    Completed,
    Archived,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayDto {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ChecklistItemDto {
    pub id: i32,
    pub date: NaiveDate,
    pub title: String,
    pub position: i32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ProgressDto {
    pub completed: u64,
    pub total: u64,
    /// Whole percent of completed items, 0 when the checklist is empty.
    pub percent: u8,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PersonalizedProgramDto {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub training_days: Vec<WeekdayDto>,
    pub daily_tasks: Vec<String>,
    pub status: PersonalizedProgramStatusDto,
    pub progress: ProgressDto,
    /// Checklist, only filled on detail responses.
    pub items: Vec<ChecklistItemDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct PersonalizedProgramFormDto {
    pub user_id: i32,
    #[serde(default)]
    pub title: String,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub training_days: Vec<WeekdayDto>,
    #[serde(default)]
    pub daily_tasks: Vec<String>,
    pub status: Option<PersonalizedProgramStatusDto>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct ToggleChecklistItemDto {
    pub completed: bool,
}
