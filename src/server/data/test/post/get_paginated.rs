use super::*;

/// Tests filtering the public listing by kind.
///
/// Expected: Ok with the published story only
#[tokio::test]
async fn filters_by_kind_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::post::create_post(db).await?;
    let story = factory::post::PostFactory::new(db)
        .kind(PostKind::Story)
        .build()
        .await?;
    factory::post::PostFactory::new(db)
        .kind(PostKind::Story)
        .status(PublishStatus::Draft)
        .build()
        .await?;

    let repo = PostRepository::new(db);
    let page = repo
        .get_paginated(
            PageParams {
                page: 0,
                per_page: 10,
            },
            Some(PostKind::Story),
            true,
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.posts[0].id, story.id);

    Ok(())
}
