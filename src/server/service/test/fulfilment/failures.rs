use super::*;

/// Tests a free checkout while blob storage and email both fail.
///
/// Expected: ticket still issued, without a QR url
#[tokio::test]
async fn failing_side_effects_keep_ticket() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("blob down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("email down"))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations {
        blob: Some(blob(server.uri())),
        email: Some(email(server.uri())),
        ..Default::default()
    };

    let event = factory::event::create_ticketed_event(db, 0).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let outcome = CheckoutService::new(db, &integrations, APP_URL)
        .checkout(event.id, &user, &viewer(&user, TierLevel::Free), None, Utc::now())
        .await?;

    let CheckoutOutcome::Issued(ticket) = outcome else {
        panic!("Expected an issued ticket, got: {:?}", outcome);
    };
    assert!(ticket.qr_url.is_none());

    let stored = TicketRepository::new(db).find_by_id(ticket.id).await?.unwrap();
    assert_eq!(stored.status, TicketStatus::Issued);

    Ok(())
}

/// Tests fulfilment of a ticket whose holder has no email address.
///
/// Expected: no email attempted, report says not emailed
#[tokio::test]
async fn skips_email_without_address() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations {
        email: Some(email(server.uri())),
        ..Default::default()
    };

    let event = factory::event::create_ticketed_event(db, 0).await?;
    let user = factory::user::UserFactory::new(db).email(None).build().await?;
    let ticket = factory::ticket::create_ticket(db, event.id, user.id).await?;

    let report = FulfilmentService::new(db, &integrations, APP_URL)
        .fulfil(&Ticket::from_entity(ticket))
        .await;

    assert!(!report.emailed);
    assert!(report.qr_url.is_none());

    Ok(())
}
