use super::*;

/// Tests resolving the Discord role of an active pro member.
///
/// Expected: the pro tier's role id
#[tokio::test]
async fn pro_member_gets_tier_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    factory::membership::create_membership(db, user.id, TierLevel::Pro).await?;

    let role = MembershipRepository::new(db)
        .tier_role_for_user(user.id, Utc::now())
        .await?;

    assert_eq!(role, Some(2001));

    Ok(())
}

/// Tests resolving roles for a free member and for a pro_plus member whose tier has
/// no role configured.
///
/// Expected: None for both
#[tokio::test]
async fn no_role_without_configured_tier_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::membership::seed_tiers(db).await?;
    let free = factory::user::create_user(db).await?;
    let plus = factory::user::create_user(db).await?;
    factory::membership::create_membership(db, plus.id, TierLevel::ProPlus).await?;

    let repo = MembershipRepository::new(db);

    assert_eq!(repo.tier_role_for_user(free.id, Utc::now()).await?, None);
    assert_eq!(repo.tier_role_for_user(plus.id, Utc::now()).await?, None);

    Ok(())
}

/// Tests that an expired membership no longer yields a role.
///
/// Expected: None once `expires_at` has passed
#[tokio::test]
async fn expired_member_gets_no_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(Utc::now() - Duration::days(1)))
        .build()
        .await?;

    let role = MembershipRepository::new(db)
        .tier_role_for_user(user.id, Utc::now())
        .await?;

    assert_eq!(role, None);

    Ok(())
}
