use super::*;

/// Tests a paid checkout when Stripe creates the session.
///
/// Expected: PaymentRequired with the Stripe URL, pending ticket holding the session id
#[tokio::test]
async fn paid_checkout_holds_pending_ticket() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("unit_amount%5D=2250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_paid_1",
            "url": "https://checkout.stripe.com/c/cs_paid_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(server.uri());

    let event = factory::event::create_ticketed_event(db, 2500).await?;
    factory::coupon::CouponFactory::new(db)
        .code("TENOFF")
        .percent_off(10)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let outcome = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(
            event.id,
            &user,
            &viewer(&user, TierLevel::Free),
            Some("TENOFF"),
            Utc::now(),
        )
        .await?;

    let CheckoutOutcome::PaymentRequired {
        ticket_id,
        checkout_url,
    } = outcome
    else {
        panic!("Expected payment to be required, got: {:?}", outcome);
    };
    assert_eq!(checkout_url, "https://checkout.stripe.com/c/cs_paid_1");

    let ticket = TicketRepository::new(db).find_by_id(ticket_id).await?.unwrap();
    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.amount_paid_cents, 2250);
    assert_eq!(ticket.stripe_session_id.as_deref(), Some("cs_paid_1"));

    Ok(())
}

/// Tests a paid checkout when Stripe fails.
///
/// Expected: Err(AppError::IntegrationErr) and no ticket left behind
#[tokio::test]
async fn stripe_failure_removes_pending_ticket() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stripe down"))
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(server.uri());

    let event = factory::event::create_ticketed_event(db, 2500).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::IntegrationErr(_))));
    assert!(TicketRepository::new(db).get_for_user(user.id).await?.is_empty());

    Ok(())
}

/// Tests a paid checkout with payments disabled.
///
/// Expected: Err(AppError::InternalError) before any ticket is created
#[tokio::test]
async fn paid_checkout_without_stripe_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let event = factory::event::create_ticketed_event(db, 2500).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
    assert!(TicketRepository::new(db).get_for_user(user.id).await?.is_empty());

    Ok(())
}

/// Tests a buyer retrying a paid checkout for the last seat before paying.
///
/// Expected: the retry succeeds, the first unpaid ticket is cancelled and the user holds
/// one seat
#[tokio::test]
async fn retried_checkout_replaces_unpaid_ticket() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_retry_1",
            "url": "https://checkout.stripe.com/c/cs_retry_1"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_retry_2",
            "url": "https://checkout.stripe.com/c/cs_retry_2"
        })))
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(server.uri());

    let event = factory::event::EventFactory::new(db)
        .ticketed(2500)
        .capacity(1)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let service = CheckoutService::new(db, &integrations, APP_URL);

    let mut ticket_ids = Vec::new();
    for _ in 0..2 {
        let outcome = service
            .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
            .await?;
        let CheckoutOutcome::PaymentRequired { ticket_id, .. } = outcome else {
            panic!("Expected payment to be required, got: {:?}", outcome);
        };
        ticket_ids.push(ticket_id);
    }

    let repo = TicketRepository::new(db);
    let first = repo.find_by_id(ticket_ids[0]).await?.unwrap();
    let second = repo.find_by_id(ticket_ids[1]).await?.unwrap();
    assert_eq!(first.status, TicketStatus::Cancelled);
    assert_eq!(second.status, TicketStatus::Pending);
    assert_eq!(second.stripe_session_id.as_deref(), Some("cs_retry_2"));

    assert_eq!(EventRepository::new(db).taken_seats(event.id).await?, 1);

    Ok(())
}
