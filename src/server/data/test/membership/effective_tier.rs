use super::*;

/// Tests the tier of a user without memberships.
///
/// Expected: Ok(Free)
#[tokio::test]
async fn defaults_to_free() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = MembershipRepository::new(db);
    assert_eq!(repo.effective_tier(user.id, Utc::now()).await?, TierLevel::Free);

    Ok(())
}

/// Tests that the highest active membership wins.
///
/// Expected: Ok(ProPlus) with both pro and pro_plus active
#[tokio::test]
async fn uses_highest_active_tier() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::membership::create_membership(db, user.id, TierLevel::Pro).await?;
    factory::membership::create_membership(db, user.id, TierLevel::ProPlus).await?;

    let repo = MembershipRepository::new(db);
    assert_eq!(
        repo.effective_tier(user.id, Utc::now()).await?,
        TierLevel::ProPlus
    );

    Ok(())
}

/// Tests that expired, pending and cancelled memberships grant nothing.
///
/// Expected: Ok(Free)
#[tokio::test]
async fn ignores_lapsed_and_inactive_memberships() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(Utc::now() - Duration::hours(1)))
        .build()
        .await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Pending)
        .build()
        .await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .tier(TierLevel::ProPlus)
        .status(MembershipStatus::Cancelled)
        .build()
        .await?;

    let repo = MembershipRepository::new(db);
    assert_eq!(repo.effective_tier(user.id, Utc::now()).await?, TierLevel::Free);

    Ok(())
}

/// Tests that a membership without expiry never lapses.
///
/// Expected: Ok(Pro)
#[tokio::test]
async fn open_ended_membership_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(None)
        .build()
        .await?;

    let repo = MembershipRepository::new(db);
    assert_eq!(repo.effective_tier(user.id, Utc::now()).await?, TierLevel::Pro);

    Ok(())
}
