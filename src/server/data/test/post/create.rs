use super::*;

/// Tests that drafts have no publication date.
///
/// Expected: Ok with published_at unset
#[tokio::test]
async fn draft_has_no_published_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_admin(db).await?;

    let repo = PostRepository::new(db);
    let post = repo.create(params(PublishStatus::Draft), author.id).await?;

    assert!(post.published_at.is_none());
    assert_eq!(post.author_id, Some(author.id));

    Ok(())
}

/// Tests that publishing stamps the publication date once.
///
/// Verifies that moving a draft to published sets published_at and that a later edit
/// keeps the original value.
///
/// Expected: published_at set on publish and unchanged by later edits
#[tokio::test]
async fn publishing_sets_published_at_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_admin(db).await?;

    let repo = PostRepository::new(db);
    let draft = repo.create(params(PublishStatus::Draft), author.id).await?;

    let published = repo
        .update(draft.id, params(PublishStatus::Published))
        .await?
        .unwrap();
    let first_published_at = published.published_at;
    assert!(first_published_at.is_some());

    let mut edited = params(PublishStatus::Published);
    edited.title = "Morning, revised".to_string();
    let edited = repo.update(draft.id, edited).await?.unwrap();

    assert_eq!(edited.title, "Morning, revised");
    assert_eq!(edited.published_at, first_published_at);

    Ok(())
}
