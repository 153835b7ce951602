use super::*;

/// Tests RSVPing to an open event, then repeating it.
///
/// Expected: first RSVP stored, second is a conflict
#[tokio::test]
async fn rsvp_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db).await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let viewer = viewer(&user, TierLevel::Free);
    let service = EventService::new(db);

    let rsvp = service.rsvp(event.id, user.id, &viewer, Utc::now()).await?;
    assert_eq!(rsvp.user_id, user.id);

    let again = service.rsvp(event.id, user.id, &viewer, Utc::now()).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests RSVPing to a full event.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_full_event() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::EventFactory::new(db).capacity(1).build().await?;
    let first = factory::user::create_user(db).await?;
    factory::event::create_rsvp(db, event.id, first.id).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = EventService::new(db)
        .rsvp(event.id, user.id, &viewer(&user, TierLevel::Free), Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests the RSVP rejections other than capacity.
///
/// Expected: ticketed and started are 400, gated is 403, draft is 404
#[tokio::test]
async fn rejects_ineligible_events() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ticketed = factory::event::create_ticketed_event(db, 1000).await?;
    let started = factory::event::EventFactory::new(db)
        .starts_at(Utc::now() - Duration::minutes(30))
        .build()
        .await?;
    let gated = factory::event::EventFactory::new(db)
        .min_tier(TierLevel::ProPlus)
        .build()
        .await?;
    let draft = factory::event::EventFactory::new(db)
        .status(EventStatus::Draft)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let viewer = viewer(&user, TierLevel::Pro);
    let service = EventService::new(db);

    assert!(matches!(
        service.rsvp(ticketed.id, user.id, &viewer, Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.rsvp(started.id, user.id, &viewer, Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.rsvp(gated.id, user.id, &viewer, Utc::now()).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.rsvp(draft.id, user.id, &viewer, Utc::now()).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests withdrawing an RSVP that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn cancel_missing_rsvp() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db).await?;
    let user = factory::user::create_user(db).await?;

    let result = EventService::new(db).cancel_rsvp(event.id, user.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
