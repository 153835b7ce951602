use super::*;

/// Tests releasing a user's unpaid tickets for one event.
///
/// Expected: only that user's pending tickets for that event are cancelled
#[tokio::test]
async fn cancels_only_own_pending_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let other_event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    let other_user = factory::user::create_user(db).await?;

    for _ in 0..2 {
        factory::ticket::TicketFactory::new(db, event.id, user.id)
            .status(TicketStatus::Pending)
            .build()
            .await?;
    }
    let other_event_ticket = factory::ticket::TicketFactory::new(db, other_event.id, user.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;
    let other_user_ticket = factory::ticket::TicketFactory::new(db, event.id, other_user.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    assert_eq!(repo.count_pending_for_user(event.id, user.id).await?, 2);
    assert_eq!(repo.cancel_pending_for_user(event.id, user.id).await?, 2);
    assert_eq!(repo.count_pending_for_user(event.id, user.id).await?, 0);

    let untouched = [other_event_ticket.id, other_user_ticket.id];
    for id in untouched {
        let ticket = repo.find_by_id(id).await?.unwrap();
        assert_eq!(ticket.status, TicketStatus::Pending);
    }

    Ok(())
}
