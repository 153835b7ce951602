use super::*;

/// Tests cancelling a user's other active memberships.
///
/// Verifies that only the other active membership of the same user is cancelled and
/// that memberships of other users are untouched.
///
/// Expected: Ok with one cancelled membership returned
#[tokio::test]
async fn cancels_only_other_memberships_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other_user = factory::user::create_user(db).await?;
    let old = factory::membership::create_membership(db, user.id, TierLevel::Pro).await?;
    let new = factory::membership::create_membership(db, user.id, TierLevel::ProPlus).await?;
    let untouched =
        factory::membership::create_membership(db, other_user.id, TierLevel::Pro).await?;

    let repo = MembershipRepository::new(db);
    let cancelled = repo.cancel_other_active(user.id, new.id).await?;

    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, old.id);
    assert_eq!(cancelled[0].tier, TierLevel::Pro);

    let old = repo.find_by_id(old.id).await?.unwrap();
    let new = repo.find_by_id(new.id).await?.unwrap();
    let untouched = repo.find_by_id(untouched.id).await?.unwrap();
    assert_eq!(old.status, MembershipStatus::Cancelled);
    assert_eq!(new.status, MembershipStatus::Active);
    assert_eq!(untouched.status, MembershipStatus::Active);

    Ok(())
}
