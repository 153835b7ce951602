use super::*;

/// Tests cancelling another member's call, then the owner cancelling it.
///
/// Expected: stranger gets 404, owner cancels
#[tokio::test]
async fn only_owner_cancels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = domain_user(factory::user::create_user(db).await?);
    let stranger = domain_user(factory::user::create_user(db).await?);
    let call = factory::coach_call::create_coach_call(
        db,
        owner.id,
        slot_start(),
        CoachCallStatus::Scheduled,
    )
    .await?;
    let integrations = Integrations::default();
    let service = CoachCallService::new(db, &integrations, CALL_MINUTES);

    assert!(matches!(
        service.cancel(call.id, &stranger).await,
        Err(AppError::NotFound(_))
    ));

    let cancelled = service.cancel(call.id, &owner).await?;
    assert_eq!(cancelled.status, CoachCallStatus::Cancelled);

    Ok(())
}

/// Tests cancelling a completed call as an admin.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn completed_call_stays() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let member = factory::user::create_user(db).await?;
    let admin = domain_user(factory::user::create_admin(db).await?);
    let call = factory::coach_call::create_coach_call(
        db,
        member.id,
        slot_start(),
        CoachCallStatus::Completed,
    )
    .await?;
    let integrations = Integrations::default();

    let result = CoachCallService::new(db, &integrations, CALL_MINUTES)
        .cancel(call.id, &admin)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
