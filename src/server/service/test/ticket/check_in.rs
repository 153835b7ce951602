use super::*;

/// Tests admitting an issued ticket, then scanning it again.
///
/// Expected: first scan checks in, second scan is a conflict
#[tokio::test]
async fn checks_in_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .code("DOOR00000001")
        .build()
        .await?;
    let service = TicketService::new(db);

    let checked_in = service.check_in("door00000001", Utc::now()).await?;
    assert_eq!(checked_in.id, ticket.id);
    assert_eq!(checked_in.status, TicketStatus::CheckedIn);
    assert!(checked_in.checked_in_at.is_some());

    let again = service.check_in("DOOR00000001", Utc::now()).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests scanning tickets that are not admissible.
///
/// Expected: pending and cancelled are 400, unknown code is 404
#[tokio::test]
async fn rejects_unusable_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    factory::ticket::TicketFactory::new(db, event.id, user.id)
        .code("PENDING00001")
        .status(TicketStatus::Pending)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, event.id, user.id)
        .code("CANCEL000001")
        .status(TicketStatus::Cancelled)
        .build()
        .await?;
    let service = TicketService::new(db);

    assert!(matches!(
        service.check_in("PENDING00001", Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.check_in("CANCEL000001", Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.check_in("MISSING00001", Utc::now()).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests cancelling tickets in different states.
///
/// Expected: issued ticket cancelled, checked-in ticket rejected
#[tokio::test]
async fn cancel_respects_check_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    let issued = factory::ticket::create_ticket(db, event.id, user.id).await?;
    let admitted = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::CheckedIn)
        .build()
        .await?;
    let service = TicketService::new(db);

    let cancelled = service.cancel(issued.id).await?;
    assert_eq!(cancelled.status, TicketStatus::Cancelled);

    assert!(matches!(
        service.cancel(admitted.id).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests releasing seats of abandoned checkouts.
///
/// Expected: only pending tickets older than a day are cancelled
#[tokio::test]
async fn cancels_stale_pending_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    let stale = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::Pending)
        .created_at(Utc::now() - Duration::hours(25))
        .build()
        .await?;
    let fresh = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;

    let cancelled = TicketService::new(db)
        .cancel_stale_pending(Utc::now())
        .await?;

    assert_eq!(cancelled, 1);
    let repo = TicketRepository::new(db);
    assert_eq!(
        repo.find_by_id(stale.id).await?.unwrap().status,
        TicketStatus::Cancelled
    );
    assert_eq!(
        repo.find_by_id(fresh.id).await?.unwrap().status,
        TicketStatus::Pending
    );

    Ok(())
}
