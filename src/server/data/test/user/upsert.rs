use super::*;

/// Tests creating a new user.
///
/// Verifies that the user repository creates a new user record with the specified
/// Discord ID, name and email and without admin status.
///
/// Expected: Ok with user created and admin status set to false
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: "123456789".to_string(),
            name: "TestUser".to_string(),
            email: Some("test@example.com".to_string()),
            is_admin: None,
        })
        .await?;

    assert_eq!(user.discord_id, "123456789");
    assert_eq!(user.name, "TestUser");
    assert_eq!(user.email.as_deref(), Some("test@example.com"));
    assert!(!user.admin);

    Ok(())
}

/// Tests updating an existing user's profile without affecting admin status.
///
/// Verifies that when upserting with is_admin as None, name and email are updated but
/// the admin flag of the existing record is preserved.
///
/// Expected: Ok with name and email updated, admin preserved, same ID
#[tokio::test]
async fn updates_existing_user_preserves_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .discord_id("555")
        .name("Old Name")
        .admin(true)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: "555".to_string(),
            name: "New Name".to_string(),
            email: Some("new@example.com".to_string()),
            is_admin: None,
        })
        .await?;

    assert_eq!(user.id, existing.id);
    assert_eq!(user.name, "New Name");
    assert_eq!(user.email.as_deref(), Some("new@example.com"));
    assert!(user.admin);

    Ok(())
}

/// Tests granting admin through an upsert.
///
/// Expected: Ok with admin set to true on the existing record
#[tokio::test]
async fn upsert_with_admin_flag_updates_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("777")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: "777".to_string(),
            name: "Promoted".to_string(),
            email: None,
            is_admin: Some(true),
        })
        .await?;

    assert!(user.admin);

    Ok(())
}
