use super::*;

/// Tests detecting a booking on the same UTC day.
///
/// Expected: true for the booked day, false for the next day
#[tokio::test]
async fn detects_booking_on_same_day() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let booked = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
    factory::coach_call::create_coach_call(db, user.id, booked, CoachCallStatus::Scheduled)
        .await?;

    let repo = CoachCallRepository::new(db);
    let same_day = CallSlot::new(Utc.with_ymd_and_hms(2026, 3, 10, 17, 30, 0).unwrap(), 30);
    let next_day = CallSlot::new(Utc.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap(), 30);

    let (start, end) = same_day.day_bounds();
    assert!(repo.exists_in_window(user.id, start, end).await?);
    let (start, end) = next_day.day_bounds();
    assert!(!repo.exists_in_window(user.id, start, end).await?);

    Ok(())
}

/// Tests that cancelled calls free the day.
///
/// Expected: false when the only call that day is cancelled
#[tokio::test]
async fn ignores_cancelled_calls() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let booked = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
    factory::coach_call::create_coach_call(db, user.id, booked, CoachCallStatus::Cancelled)
        .await?;

    let repo = CoachCallRepository::new(db);
    let (start, end) = CallSlot::new(booked, 30).day_bounds();
    assert!(!repo.exists_in_window(user.id, start, end).await?);

    Ok(())
}

/// Tests that another user's call does not block the day.
///
/// Expected: false for the other user
#[tokio::test]
async fn other_users_do_not_block() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let booked = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
    factory::coach_call::create_coach_call(db, user.id, booked, CoachCallStatus::Scheduled)
        .await?;

    let repo = CoachCallRepository::new(db);
    let (start, end) = CallSlot::new(booked, 30).day_bounds();
    assert!(!repo.exists_in_window(other.id, start, end).await?);

    Ok(())
}
