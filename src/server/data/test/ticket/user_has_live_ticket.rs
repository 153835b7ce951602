use super::*;

/// Tests detecting an issued ticket held by the user.
///
/// Expected: true for issued or checked-in tickets, false for pending or cancelled
#[tokio::test]
async fn only_issued_or_checked_in_count() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let pending_user = factory::user::create_user(db).await?;
    let cancelled_user = factory::user::create_user(db).await?;
    let checked_in_user = factory::user::create_user(db).await?;

    factory::ticket::TicketFactory::new(db, event.id, pending_user.id)
        .status(TicketStatus::Pending)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, event.id, cancelled_user.id)
        .status(TicketStatus::Cancelled)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, event.id, checked_in_user.id)
        .status(TicketStatus::CheckedIn)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    assert!(!repo.user_has_live_ticket(event.id, pending_user.id).await?);
    assert!(!repo.user_has_live_ticket(event.id, cancelled_user.id).await?);
    assert!(repo.user_has_live_ticket(event.id, checked_in_user.id).await?);

    Ok(())
}
