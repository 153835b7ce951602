use super::*;

/// Tests expiring memberships past their expiry.
///
/// Expected: Ok with only the lapsed membership expired
#[tokio::test]
async fn expires_only_lapsed_memberships() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let lapsed = factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(Utc::now() - Duration::minutes(5)))
        .build()
        .await?;
    let current = factory::membership::create_membership(db, user.id, TierLevel::Pro).await?;

    let repo = MembershipRepository::new(db);
    let expired = repo.expire_due(Utc::now()).await?;

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, lapsed.id);
    assert_eq!(
        repo.find_by_id(lapsed.id).await?.unwrap().status,
        MembershipStatus::Expired
    );
    assert_eq!(
        repo.find_by_id(current.id).await?.unwrap().status,
        MembershipStatus::Active
    );

    Ok(())
}

/// Tests running expiry with nothing due.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn nothing_due_returns_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MembershipRepository::new(db);
    assert!(repo.expire_due(Utc::now()).await?.is_empty());

    Ok(())
}
