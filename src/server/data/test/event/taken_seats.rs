use super::*;

/// Tests seat counting across RSVPs and ticket states.
///
/// Verifies that RSVPs plus pending, issued and checked-in tickets hold seats while
/// cancelled tickets do not.
///
/// Expected: Ok(4)
#[tokio::test]
async fn counts_rsvps_and_live_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::EventFactory::new(db).capacity(10).build().await?;
    let rsvp_user = factory::user::create_user(db).await?;
    factory::event::create_rsvp(db, event.id, rsvp_user.id).await?;

    for status in [
        TicketStatus::Pending,
        TicketStatus::Issued,
        TicketStatus::CheckedIn,
        TicketStatus::Cancelled,
    ] {
        let user = factory::user::create_user(db).await?;
        factory::ticket::TicketFactory::new(db, event.id, user.id)
            .status(status)
            .build()
            .await?;
    }

    let repo = EventRepository::new(db);
    assert_eq!(repo.taken_seats(event.id).await?, 4);

    Ok(())
}
