use super::*;

/// Tests paginating users ordered by name.
///
/// Verifies page contents and pagination metadata for 5 users with 2 per page.
///
/// Expected: Ok with 2 users on page 1, total 5 and 3 total pages
#[tokio::test]
async fn paginates_users_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Eve", "Bob", "Dan", "Amy", "Cat"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let page = repo
        .get_all_paginated(PageParams {
            page: 1,
            per_page: 2,
        })
        .await?;

    let names: Vec<&str> = page.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Cat", "Dan"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);

    Ok(())
}

/// Tests paginating an empty table.
///
/// Expected: Ok with no users and zero pages
#[tokio::test]
async fn empty_table_has_no_pages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let page = repo
        .get_all_paginated(PageParams {
            page: 0,
            per_page: 10,
        })
        .await?;

    assert!(page.users.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);

    Ok(())
}
