use super::*;

/// Tests creating a ticket.
///
/// Expected: Ok with a generated code and the ticket findable by that code
#[tokio::test]
async fn creates_ticket_with_code() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 2000).await?;
    let user = factory::user::create_user(db).await?;

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParams {
            event_id: event.id,
            user_id: user.id,
            status: TicketStatus::Pending,
            amount_paid_cents: 0,
            coupon_id: None,
        })
        .await?;

    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.code.len(), 12);
    assert_eq!(
        repo.find_by_code(&ticket.code).await?.map(|t| t.id),
        Some(ticket.id)
    );

    Ok(())
}

/// Tests issuing a pending ticket and attaching a checkout session.
///
/// Expected: status issued with the paid amount, ticket found by session
#[tokio::test]
async fn issues_pending_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 2000).await?;
    let user = factory::user::create_user(db).await?;
    let pending = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    repo.set_stripe_session(pending.id, "cs_ticket".to_string())
        .await?;
    let issued = repo.issue(pending.id, 1800).await?.unwrap();

    assert_eq!(issued.status, TicketStatus::Issued);
    assert_eq!(issued.amount_paid_cents, 1800);
    assert_eq!(
        repo.find_by_session("cs_ticket").await?.map(|t| t.id),
        Some(pending.id)
    );

    Ok(())
}
