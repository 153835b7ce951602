use super::*;

/// Tests activating a pending membership.
///
/// Expected: Ok(Some) with active status, start, expiry and subscription set
#[tokio::test]
async fn activates_pending_membership() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = MembershipRepository::new(db);
    let pending = repo
        .create_pending(user.id, TierLevel::Pro, "cs_test_1".to_string())
        .await?;

    let now = Utc::now();
    let expires_at = now + Duration::days(30);
    let membership = repo
        .activate(pending.id, now, expires_at, Some("sub_test_1".to_string()))
        .await?
        .unwrap();

    assert_eq!(membership.status, MembershipStatus::Active);
    assert_eq!(membership.stripe_subscription_id.as_deref(), Some("sub_test_1"));
    assert_eq!(
        membership.started_at.map(|t| t.timestamp()),
        Some(now.timestamp())
    );
    assert_eq!(
        membership.expires_at.map(|t| t.timestamp()),
        Some(expires_at.timestamp())
    );

    Ok(())
}

/// Tests that pending memberships are found by checkout session.
///
/// Expected: Ok(Some) for the stored session, Ok(None) otherwise
#[tokio::test]
async fn finds_membership_by_session() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = MembershipRepository::new(db);
    let pending = repo
        .create_pending(user.id, TierLevel::ProPlus, "cs_test_2".to_string())
        .await?;

    let found = repo.find_by_session("cs_test_2").await?;
    assert_eq!(found.map(|m| m.id), Some(pending.id));
    assert!(repo.find_by_session("cs_unknown").await?.is_none());

    Ok(())
}

/// Tests finding the membership renewed by a subscription.
///
/// Expected: the newest membership carrying the subscription, Ok(None) for others
#[tokio::test]
async fn finds_newest_membership_by_subscription() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Cancelled)
        .stripe_subscription_id("sub_shared")
        .build()
        .await?;
    let newest = factory::membership::MembershipFactory::new(db, user.id)
        .stripe_subscription_id("sub_shared")
        .build()
        .await?;

    let repo = MembershipRepository::new(db);
    let found = repo.find_by_subscription("sub_shared").await?;
    assert_eq!(found.map(|m| m.id), Some(newest.id));
    assert!(repo.find_by_subscription("sub_unknown").await?.is_none());

    Ok(())
}
