use super::*;

/// Tests cancelling an active membership twice.
///
/// Expected: cancelled on the first call, unchanged on the second
#[tokio::test]
async fn cancel_is_repeatable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let membership = factory::membership::create_membership(db, user.id, TierLevel::Pro).await?;
    let service = MembershipService::new(db, &integrations, APP_URL);

    let first = service.cancel(membership.id).await?;
    let second = service.cancel(membership.id).await?;

    assert_eq!(first.status, MembershipStatus::Cancelled);
    assert_eq!(second.status, MembershipStatus::Cancelled);

    let tier = MembershipRepository::new(db)
        .effective_tier(user.id, Utc::now())
        .await?;
    assert_eq!(tier, TierLevel::Free);

    Ok(())
}

/// Tests cancelling a membership that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn cancel_unknown_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let result = MembershipService::new(db, &integrations, APP_URL)
        .cancel(404)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
