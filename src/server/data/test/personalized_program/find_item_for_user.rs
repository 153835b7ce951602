use super::*;

/// Tests that checklist items are only found for their owner.
///
/// Expected: Some for the owner, None for another user
#[tokio::test]
async fn only_owner_finds_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let program =
        factory::personalized_program::create_personalized_program(db, owner.id, date(5), date(9), 0b1)
            .await?;
    let item =
        factory::personalized_program::create_checklist_item(db, program.id, date(5), "Run")
            .await?;

    let repo = PersonalizedProgramRepository::new(db);
    assert!(repo.find_item_for_user(item.id, owner.id).await?.is_some());
    assert!(repo.find_item_for_user(item.id, stranger.id).await?.is_none());
    assert!(repo.find_item_for_user(9999, owner.id).await?.is_none());

    Ok(())
}
