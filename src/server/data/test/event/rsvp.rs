use super::*;

/// Tests creating, finding and deleting an RSVP.
///
/// Expected: RSVP found after creation, deletion reports true once
#[tokio::test]
async fn rsvp_lifecycle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db).await?;
    let user = factory::user::create_user(db).await?;

    let repo = EventRepository::new(db);
    assert!(repo.find_rsvp(event.id, user.id).await?.is_none());

    let rsvp = repo.create_rsvp(event.id, user.id).await?;
    assert_eq!(rsvp.user_id, user.id);
    assert!(repo.find_rsvp(event.id, user.id).await?.is_some());

    let users = repo.get_rsvp_users(event.id).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, user.id);

    assert!(repo.delete_rsvp(event.id, user.id).await?);
    assert!(!repo.delete_rsvp(event.id, user.id).await?);

    Ok(())
}
