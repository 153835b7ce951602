use super::*;

/// Tests cancelling abandoned checkouts.
///
/// Verifies that only pending tickets older than the cutoff are cancelled.
///
/// Expected: Ok(1) with the old pending ticket cancelled
#[tokio::test]
async fn cancels_old_pending_tickets_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 1000).await?;
    let user = factory::user::create_user(db).await?;
    let now = Utc::now();

    let stale = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::Pending)
        .created_at(now - Duration::hours(30))
        .build()
        .await?;
    let fresh = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .status(TicketStatus::Pending)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    let old_issued = factory::ticket::TicketFactory::new(db, event.id, user.id)
        .created_at(now - Duration::hours(48))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let cancelled = repo.cancel_stale_pending(now - Duration::hours(24)).await?;

    assert_eq!(cancelled, 1);
    assert_eq!(
        repo.find_by_id(stale.id).await?.unwrap().status,
        TicketStatus::Cancelled
    );
    assert_eq!(
        repo.find_by_id(fresh.id).await?.unwrap().status,
        TicketStatus::Pending
    );
    assert_eq!(
        repo.find_by_id(old_issued.id).await?.unwrap().status,
        TicketStatus::Issued
    );

    Ok(())
}
