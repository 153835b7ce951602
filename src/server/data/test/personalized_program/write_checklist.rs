use super::*;

/// Tests creating a program with its checklist.
///
/// Expected: Ok with the planned items stored in date then position order
#[tokio::test]
async fn creates_program_with_checklist() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = PersonalizedProgramRepository::new(db);
    let program = repo
        .create(
            params(user.id),
            vec![planned(6, "Long run", 0), planned(5, "Main set", 1), planned(5, "Warm up", 0)],
        )
        .await?;

    let items = repo.get_items(program.id).await?;
    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Warm up", "Main set", "Long run"]);

    Ok(())
}

/// Tests that regeneration keeps completions of surviving items.
///
/// Verifies that an item whose date and title still exist after regeneration keeps its
/// completion time while new items start incomplete and dropped items disappear.
///
/// Expected: Ok with the surviving item still completed
#[tokio::test]
async fn keeps_completion_of_surviving_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = PersonalizedProgramRepository::new(db);
    let program = repo
        .create(
            params(user.id),
            vec![planned(5, "Warm up", 0), planned(5, "Main set", 1)],
        )
        .await?;
    let items = repo.get_items(program.id).await?;
    assert_eq!(items.len(), 2);

    repo.set_item_completed(items[0].id, Some(Utc::now())).await?;
    repo.set_item_completed(items[1].id, Some(Utc::now())).await?;

    repo.update(
        program.id,
        params(user.id),
        Some(vec![planned(5, "Warm up", 0), planned(5, "Intervals", 1)]),
    )
    .await?
    .unwrap();
    let regenerated = repo.get_items(program.id).await?;

    assert_eq!(regenerated.len(), 2);
    assert_eq!(regenerated[0].title, "Warm up");
    assert!(regenerated[0].completed_at.is_some());
    assert_eq!(regenerated[1].title, "Intervals");
    assert!(regenerated[1].completed_at.is_none());

    Ok(())
}

/// Tests updating a program without a new plan.
///
/// Expected: Ok with the checklist untouched
#[tokio::test]
async fn update_without_plan_keeps_checklist() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let program =
        factory::personalized_program::create_personalized_program(db, user.id, date(5), date(9), 0b1)
            .await?;
    factory::personalized_program::create_checklist_item(db, program.id, date(5), "Old").await?;

    let repo = PersonalizedProgramRepository::new(db);
    let mut renamed = params(user.id);
    renamed.title = "Renamed".to_string();
    let updated = repo.update(program.id, renamed, None).await?.unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(repo.get_items(program.id).await?.len(), 1);

    Ok(())
}

/// Tests a regeneration whose insert fails halfway.
///
/// Two planned items share a date and position, which the checklist index rejects after
/// the old items were already deleted.
///
/// Expected: Err, with the program and its previous checklist unchanged
#[tokio::test]
async fn failed_regeneration_keeps_previous_checklist() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let program =
        factory::personalized_program::create_personalized_program(db, user.id, date(5), date(9), 0b1)
            .await?;
    factory::personalized_program::create_checklist_item(db, program.id, date(5), "Old").await?;

    let repo = PersonalizedProgramRepository::new(db);
    let mut renamed = params(user.id);
    renamed.title = "Renamed".to_string();
    let result = repo
        .update(
            program.id,
            renamed,
            Some(vec![planned(6, "Clash", 0), planned(6, "Clash again", 0)]),
        )
        .await;

    assert!(result.is_err());
    let items = repo.get_items(program.id).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Old");
    assert_eq!(
        repo.find_by_id(program.id).await?.map(|p| p.title),
        Some(program.title)
    );

    Ok(())
}

/// Tests deleting a program.
///
/// Expected: Ok(true) with program and checklist gone, Ok(false) afterwards
#[tokio::test]
async fn deletes_program_and_checklist() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let program =
        factory::personalized_program::create_personalized_program(db, user.id, date(5), date(9), 0b1)
            .await?;
    factory::personalized_program::create_checklist_item(db, program.id, date(5), "Old").await?;

    let repo = PersonalizedProgramRepository::new(db);
    assert!(repo.delete(program.id).await?);
    assert!(repo.get_items(program.id).await?.is_empty());
    assert!(!repo.delete(program.id).await?);

    Ok(())
}
