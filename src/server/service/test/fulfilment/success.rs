use super::*;

/// Tests fulfilment when blob storage and email both work.
///
/// Expected: QR uploaded under the ticket code, url stored on the ticket, email sent
#[tokio::test]
async fn stores_qr_and_emails_holder() -> Result<(), AppError> {
    let server = MockServer::start().await;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 0).await?;
    let user = factory::user::create_user(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .code("QRTEST000001")
        .build()
        .await?;

    Mock::given(method("PUT"))
        .and(path("/tickets/QRTEST000001.svg"))
        .and(header("x-content-type", "image/svg+xml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "url": "https://blob.test/tickets/QRTEST000001.svg"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "em_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let integrations = Integrations {
        blob: Some(blob(server.uri())),
        email: Some(email(server.uri())),
        ..Default::default()
    };
    let report = FulfilmentService::new(db, &integrations, APP_URL)
        .fulfil(&Ticket::from_entity(ticket.clone()))
        .await;

    assert_eq!(
        report.qr_url.as_deref(),
        Some("https://blob.test/tickets/QRTEST000001.svg")
    );
    assert!(report.emailed);
    assert!(!report.messaged);

    let stored = TicketRepository::new(db).find_by_id(ticket.id).await?.unwrap();
    assert_eq!(stored.qr_url, report.qr_url);
    assert_eq!(
        FulfilmentService::new(db, &integrations, APP_URL).verify_url(&stored),
        "https://members.test/tickets/verify/QRTEST000001"
    );

    Ok(())
}
