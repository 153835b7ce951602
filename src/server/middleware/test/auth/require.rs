use super::*;

/// Tests a request without a session user.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_request() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session)
        .require(&[Permission::LoggedIn])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a user that no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase) with the stale id
#[tokio::test]
async fn rejects_deleted_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::LoggedIn])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(user_id))) => {
            assert_eq!(user_id, 4242)
        }
        other => panic!("Expected UserNotInDatabase, got: {:?}", other),
    }

    Ok(())
}

/// Tests an empty permission list with a logged in user.
///
/// Expected: Ok(User) for the session user
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let returned = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(returned.id, user.id);
    assert_eq!(returned.discord_id, user.discord_id);

    Ok(())
}

/// Tests the admin permission for a regular member.
///
/// Expected: Err(AuthError::AccessDenied) naming the member
#[tokio::test]
async fn denies_admin_to_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, user.id);
            assert!(message.contains("admin"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests the admin permission for an admin.
///
/// Expected: Ok(User) with admin set
#[tokio::test]
async fn grants_admin_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let returned = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert!(returned.admin);

    Ok(())
}

/// Tests a tier check for a member without a membership.
///
/// Expected: Err(AuthError::InsufficientTier) reporting free against pro
#[tokio::test]
async fn denies_tier_without_membership() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Tier(TierLevel::Pro)])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::InsufficientTier {
            required, actual, ..
        })) => {
            assert_eq!(required, TierLevel::Pro);
            assert_eq!(actual, TierLevel::Free);
        }
        other => panic!("Expected InsufficientTier, got: {:?}", other),
    }

    Ok(())
}

/// Tests that a higher tier satisfies a lower requirement.
///
/// Expected: Ok(User) for a pro+ member asking for pro
#[tokio::test]
async fn higher_tier_satisfies_lower_requirement() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .tier(TierLevel::ProPlus)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::LoggedIn, Permission::Tier(TierLevel::Pro)])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests that an expired membership no longer counts.
///
/// Expected: Err(AuthError::InsufficientTier)
#[tokio::test]
async fn ignores_lapsed_membership() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(Utc::now() - Duration::days(1)))
        .build()
        .await?;
    factory::membership::MembershipFactory::new(db, user.id)
        .tier(TierLevel::ProPlus)
        .status(MembershipStatus::Cancelled)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Tier(TierLevel::Pro)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InsufficientTier { .. }))
    ));

    Ok(())
}

/// Tests that admins pass tier checks without a membership.
///
/// Expected: Ok(User)
#[tokio::test]
async fn admin_passes_tier_check() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Tier(TierLevel::ProPlus)])
        .await;

    assert!(result.is_ok());

    Ok(())
}
