use super::*;

/// Tests buying a ticket to an event whose seats are taken.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_sold_out_event() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::EventFactory::new(db)
        .ticketed(0)
        .capacity(1)
        .build()
        .await?;
    let holder = factory::user::create_user(db).await?;
    factory::ticket::TicketFactory::new(db, event.id, holder.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests buying a second ticket to the same event.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_second_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::create_ticketed_event(db, 0).await?;
    let user = domain_user(factory::user::create_user(db).await?);
    factory::ticket::create_ticket(db, event.id, user.id).await?;

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests buying a ticket to an event gated above the buyer's tier.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn rejects_insufficient_tier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::EventFactory::new(db)
        .ticketed(0)
        .min_tier(TierLevel::Pro)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests checkout on an RSVP-only event.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_non_ticketed_event() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::create_event(db).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a coupon code that does not exist.
///
/// Expected: Err(AppError::BadRequest) and no ticket created
#[tokio::test]
async fn rejects_unknown_coupon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::create_ticketed_event(db, 0).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(
            event.id,
            &user,
            &viewer(&user, TierLevel::Free),
            Some("NOPE"),
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(TicketRepository::new(db).get_for_user(user.id).await?.is_empty());

    Ok(())
}
