use crate::server::{
    error::AppError,
    model::personalized_program::{PersonalizedProgramParams, TrainingDays},
    service::personalized_program::PersonalizedProgramService,
};
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use entity::sea_orm_active_enums::PersonalizedProgramStatus;
use test_utils::{builder::TestBuilder, factory};

mod schedule;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two weeks from Monday 2026-03-02, training Monday and Thursday with two tasks.
fn params(user_id: i32) -> PersonalizedProgramParams {
    PersonalizedProgramParams {
        user_id,
        title: "Spring block".to_string(),
        notes: None,
        start_date: date(2026, 3, 2),
        end_date: date(2026, 3, 15),
        training_days: [Weekday::Mon, Weekday::Thu].into_iter().collect::<TrainingDays>(),
        daily_tasks: vec!["Mobility".to_string(), "Intervals".to_string()],
        status: PersonalizedProgramStatus::Active,
    }
}
