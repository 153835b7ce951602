use super::*;

/// Tests creating a program for a member.
///
/// Expected: one item per task on each training day
#[tokio::test]
async fn create_generates_checklist() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let (program, items) = PersonalizedProgramService::new(db)
        .create(params(user.id))
        .await?;

    assert_eq!(program.user_id, user.id);
    assert_eq!(items.len(), 8);
    assert_eq!(items[0].date, date(2026, 3, 2));
    assert_eq!(items[0].title, "Mobility");
    assert_eq!(items[1].title, "Intervals");
    assert!(items
        .iter()
        .all(|item| matches!(item.date.weekday(), Weekday::Mon | Weekday::Thu)));

    Ok(())
}

/// Tests creating programs with unusable schedules or owners.
///
/// Expected: bad schedules are 400, unknown member is 404
#[tokio::test]
async fn create_rejects_bad_input() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let service = PersonalizedProgramService::new(db);

    let mut reversed = params(user.id);
    reversed.end_date = date(2026, 2, 1);
    assert!(matches!(
        service.create(reversed).await,
        Err(AppError::BadRequest(_))
    ));

    let mut restless = params(user.id);
    restless.training_days = TrainingDays::default();
    assert!(matches!(
        service.create(restless).await,
        Err(AppError::BadRequest(_))
    ));

    assert!(matches!(
        service.create(params(4242)).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests changing the schedule after an item was completed.
///
/// Expected: checklist regenerated, surviving item keeps its completion
#[tokio::test]
async fn update_regenerates_and_keeps_completion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let service = PersonalizedProgramService::new(db);
    let (program, items) = service.create(params(user.id)).await?;

    let first = &items[0];
    let done = service
        .set_item_completed(first.id, user.id, true, Utc::now())
        .await?;

    let mut longer = params(user.id);
    longer.end_date = date(2026, 3, 22);
    let (_, regenerated) = service.update(program.id, longer).await?;

    assert_eq!(regenerated.len(), 12);
    let kept = regenerated
        .iter()
        .find(|item| item.date == first.date && item.title == first.title)
        .unwrap();
    assert_eq!(
        kept.completed_at.map(|at| at.timestamp()),
        done.completed_at.map(|at| at.timestamp())
    );
    assert_eq!(regenerated.iter().filter(|i| i.is_completed()).count(), 1);

    Ok(())
}

/// Tests updating only the notes of a program.
///
/// Expected: checklist left untouched
#[tokio::test]
async fn notes_update_keeps_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let service = PersonalizedProgramService::new(db);
    let (program, items) = service.create(params(user.id)).await?;

    let mut annotated = params(user.id);
    annotated.notes = Some("Keep heart rate low".to_string());
    let (updated, kept) = service.update(program.id, annotated).await?;

    assert_eq!(updated.notes.as_deref(), Some("Keep heart rate low"));
    let before: Vec<i32> = items.iter().map(|i| i.id).collect();
    let after: Vec<i32> = kept.iter().map(|i| i.id).collect();
    assert_eq!(before, after);

    Ok(())
}
