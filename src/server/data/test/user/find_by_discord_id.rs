use super::*;

/// Tests looking up users by their Discord account.
///
/// Expected: Ok(Some) for a known account, Ok(None) for an unknown one
#[tokio::test]
async fn finds_user_by_discord_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("424242")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_discord_id("424242").await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().discord_id, "424242");

    assert!(repo.find_by_discord_id("999999").await?.is_none());

    Ok(())
}
