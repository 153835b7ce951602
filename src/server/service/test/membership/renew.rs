use super::*;

/// Tests renewing a pro membership before it lapses.
///
/// Expected: new expiry is the old expiry plus 30 days, old membership cancelled
#[tokio::test]
async fn renewal_extends_from_current_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let now = Utc::now();
    let current_expiry = now + Duration::days(10);
    let current = factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(current_expiry))
        .build()
        .await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Pending)
        .expires_at(None)
        .stripe_session_id("cs_renew")
        .build()
        .await?;

    let renewed = MembershipService::new(db, &integrations, APP_URL)
        .complete_checkout("cs_renew", None, now)
        .await?
        .unwrap();

    assert_eq!(renewed.status, MembershipStatus::Active);
    assert_eq!(
        renewed.expires_at.map(|at| at.timestamp()),
        Some((current_expiry + Duration::days(30)).timestamp())
    );

    let current = MembershipRepository::new(db)
        .find_by_id(current.id)
        .await?
        .unwrap();
    assert_eq!(current.status, MembershipStatus::Cancelled);

    Ok(())
}

/// Tests completing a session that has no membership.
///
/// Expected: Ok(None)
#[tokio::test]
async fn unknown_session_is_ignored() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let result = MembershipService::new(db, &integrations, APP_URL)
        .complete_checkout("cs_missing", None, Utc::now())
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests the scheduled expiry of lapsed memberships.
///
/// Expected: only the lapsed active membership is expired
#[tokio::test]
async fn expires_lapsed_memberships() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let lapsed = factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(Utc::now() - Duration::hours(1)))
        .build()
        .await?;
    let other = factory::user::create_user(db).await?;
    factory::membership::create_membership(db, other.id, TierLevel::Pro).await?;

    let expired = MembershipService::new(db, &integrations, APP_URL)
        .expire_due(Utc::now())
        .await?;

    assert_eq!(expired, 1);
    let lapsed = MembershipRepository::new(db)
        .find_by_id(lapsed.id)
        .await?
        .unwrap();
    assert_eq!(lapsed.status, MembershipStatus::Expired);

    Ok(())
}
