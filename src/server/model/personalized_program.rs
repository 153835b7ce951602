//! Personalized programs, their training-day set and checklist generation.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use entity::sea_orm_active_enums::PersonalizedProgramStatus;
use thiserror::Error;

use crate::model::personalized_program::{
    ChecklistItemDto, PersonalizedProgramDto, PersonalizedProgramFormDto,
    PersonalizedProgramStatusDto, ProgressDto, WeekdayDto,
};

/// Longest allowed span between start and end date, in days.
pub const MAX_PROGRAM_SPAN_DAYS: i64 = 366;

impl From<PersonalizedProgramStatus> for PersonalizedProgramStatusDto {
    fn from(value: PersonalizedProgramStatus) -> Self {
        match value {
            PersonalizedProgramStatus::Active => PersonalizedProgramStatusDto::Active,
            PersonalizedProgramStatus::Completed => PersonalizedProgramStatusDto::Completed,
            PersonalizedProgramStatus::Archived => PersonalizedProgramStatusDto::Archived,
        }
    }
}

impl From<PersonalizedProgramStatusDto> for PersonalizedProgramStatus {
    fn from(value: PersonalizedProgramStatusDto) -> Self {
        match value {
            PersonalizedProgramStatusDto::Active => PersonalizedProgramStatus::Active,
            PersonalizedProgramStatusDto::Completed => PersonalizedProgramStatus::Completed,
            PersonalizedProgramStatusDto::Archived => PersonalizedProgramStatus::Archived,
        }
    }
}

impl From<WeekdayDto> for Weekday {
    fn from(value: WeekdayDto) -> Self {
        match value {
            WeekdayDto::Mon => Weekday::Mon,
            WeekdayDto::Tue => Weekday::Tue,
            WeekdayDto::Wed => Weekday::Wed,
            WeekdayDto::Thu => Weekday::Thu,
            WeekdayDto::Fri => Weekday::Fri,
            WeekdayDto::Sat => Weekday::Sat,
            WeekdayDto::Sun => Weekday::Sun,
        }
    }
}

impl From<Weekday> for WeekdayDto {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => WeekdayDto::Mon,
            Weekday::Tue => WeekdayDto::Tue,
            Weekday::Wed => WeekdayDto::Wed,
            Weekday::Thu => WeekdayDto::Thu,
            Weekday::Fri => WeekdayDto::Fri,
            Weekday::Sat => WeekdayDto::Sat,
            Weekday::Sun => WeekdayDto::Sun,
        }
    }
}

/// Set of training weekdays stored as a bit mask, bit 0 = Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrainingDays(u8);

impl TrainingDays {
    const ALL_BITS: u8 = 0b0111_1111;

    pub fn from_mask(mask: i32) -> Self {
        Self((mask as u8) & Self::ALL_BITS)
    }

    pub fn mask(&self) -> i32 {
        self.0 as i32
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    /// Weekdays in the set, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.contains(*day))
        .collect()
    }
}

impl FromIterator<Weekday> for TrainingDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .fold(0, |mask, day| mask | (1 << day.num_days_from_monday())),
        )
    }
}

/// Reason a checklist cannot be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("End date must not be before start date")]
    EndBeforeStart,
    #[error("At least one training day is required")]
    NoTrainingDays,
    #[error("Program may span at most {max} days", max = MAX_PROGRAM_SPAN_DAYS)]
    SpanTooLong,
}

/// Checklist entry before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub date: NaiveDate,
    pub title: String,
    pub position: i32,
}

/// Expands a date range into one checklist entry per task on every training day.
///
/// Both ends are inclusive. With no daily tasks each training day gets a single entry
/// titled `fallback_title`.
///
/// # Arguments
/// - `start` - First day of the program
/// - `end` - Last day of the program
/// - `days` - Training weekdays
/// - `tasks` - Tasks repeated on every training day, in order
/// - `fallback_title` - Title used when `tasks` is empty
///
/// # Returns
/// - `Ok(Vec<PlannedItem>)` - Entries ordered by date then position
/// - `Err(ScheduleError)` - Range is inverted, too long or has no training days
pub fn generate_checklist(
    start: NaiveDate,
    end: NaiveDate,
    days: TrainingDays,
    tasks: &[String],
    fallback_title: &str,
) -> Result<Vec<PlannedItem>, ScheduleError> {
    if end < start {
        return Err(ScheduleError::EndBeforeStart);
    }
    if days.is_empty() {
        return Err(ScheduleError::NoTrainingDays);
    }
    if (end - start).num_days() > MAX_PROGRAM_SPAN_DAYS {
        return Err(ScheduleError::SpanTooLong);
    }

    let titles: Vec<&str> = if tasks.is_empty() {
        vec![fallback_title]
    } else {
        tasks.iter().map(String::as_str).collect()
    };

    let items = start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| days.contains(date.weekday()))
        .flat_map(|date| {
            titles
                .iter()
                .enumerate()
                .map(move |(position, title)| PlannedItem {
                    date,
                    title: title.to_string(),
                    position: position as i32,
                })
        })
        .collect();

    Ok(items)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    pub id: i32,
    pub personalized_program_id: i32,
    pub date: NaiveDate,
    pub title: String,
    pub position: i32,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    pub fn from_entity(entity: entity::checklist_item::Model) -> Self {
        Self {
            id: entity.id,
            personalized_program_id: entity.personalized_program_id,
            date: entity.date,
            title: entity.title,
            position: entity.position,
            completed_at: entity.completed_at,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn into_dto(self) -> ChecklistItemDto {
        ChecklistItemDto {
            completed: self.is_completed(),
            id: self.id,
            date: self.date,
            title: self.title,
            position: self.position,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    pub fn of(items: &[ChecklistItem]) -> Self {
        Self {
            completed: items.iter().filter(|i| i.is_completed()).count() as u64,
            total: items.len() as u64,
        }
    }

    /// Whole percent completed, rounded down.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100 / self.total) as u8
    }

    pub fn into_dto(self) -> ProgressDto {
        ProgressDto {
            percent: self.percent(),
            completed: self.completed,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizedProgram {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub training_days: TrainingDays,
    pub daily_tasks: Vec<String>,
    pub status: PersonalizedProgramStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonalizedProgram {
    /// Converts an entity, failing when the stored daily task list is not a JSON string array.
    pub fn from_entity(entity: entity::personalized_program::Model) -> Result<Self, serde_json::Error> {
        let daily_tasks: Vec<String> = serde_json::from_value(entity.daily_tasks)?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            notes: entity.notes,
            start_date: entity.start_date,
            end_date: entity.end_date,
            training_days: TrainingDays::from_mask(entity.training_days),
            daily_tasks,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts to a DTO with the given checklist and progress computed from it.
    ///
    /// Listings pass `include_items = false` so only the progress is sent.
    pub fn into_dto(self, items: Vec<ChecklistItem>, include_items: bool) -> PersonalizedProgramDto {
        let progress = Progress::of(&items).into_dto();
        let items = if include_items {
            items.into_iter().map(ChecklistItem::into_dto).collect()
        } else {
            Vec::new()
        };

        PersonalizedProgramDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            notes: self.notes,
            start_date: self.start_date,
            end_date: self.end_date,
            training_days: self
                .training_days
                .weekdays()
                .into_iter()
                .map(Into::into)
                .collect(),
            daily_tasks: self.daily_tasks,
            status: self.status.into(),
            progress,
            items,
        }
    }

    /// Whether changing to `params` alters the generated checklist.
    pub fn schedule_changed(&self, params: &PersonalizedProgramParams) -> bool {
        self.start_date != params.start_date
            || self.end_date != params.end_date
            || self.training_days != params.training_days
            || self.daily_tasks != params.daily_tasks
            || (self.daily_tasks.is_empty() && self.title != params.title)
    }
}

#[derive(Debug, Clone)]
pub struct PersonalizedProgramParams {
    pub user_id: i32,
    pub title: String,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub training_days: TrainingDays,
    pub daily_tasks: Vec<String>,
    pub status: PersonalizedProgramStatus,
}

impl PersonalizedProgramParams {
    /// Builds params from a form, trimming tasks and dropping blank ones.
    pub fn from_dto(dto: PersonalizedProgramFormDto) -> Self {
        Self {
            user_id: dto.user_id,
            title: dto.title.trim().to_string(),
            notes: dto.notes.filter(|n| !n.trim().is_empty()),
            start_date: dto.start_date,
            end_date: dto.end_date,
            training_days: dto.training_days.into_iter().map(Weekday::from).collect(),
            daily_tasks: dto
                .daily_tasks
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            status: dto
                .status
                .map(Into::into)
                .unwrap_or(PersonalizedProgramStatus::Active),
        }
    }

    pub fn plan(&self) -> Result<Vec<PlannedItem>, ScheduleError> {
        generate_checklist(
            self.start_date,
            self.end_date,
            self.training_days,
            &self.daily_tasks,
            &self.title,
        )
    }
}
