use super::*;

fn params(slug: &str) -> PostParams {
    PostParams {
        kind: PostKind::Poetry,
        title: "Morning run".to_string(),
        slug: slug.to_string(),
        body_markdown: "Cold air,\n*steady* breath.".to_string(),
        excerpt: None,
        min_tier: TierLevel::Free,
        status: PublishStatus::Published,
    }
}

/// Tests publishing a post, then reusing its slug.
///
/// Expected: first post stamped as published, duplicate slug 409
#[tokio::test]
async fn create_stamps_and_rejects_duplicate_slug() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_admin(db).await?;
    let service = PostService::new(db);

    let post = service.create(params("morning-run"), author.id).await?;
    assert_eq!(post.author_id, Some(author.id));
    assert!(post.published_at.is_some());

    assert!(matches!(
        service.create(params("morning-run"), author.id).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service.create(params("Morning Run"), author.id).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests post access and kind filtering.
///
/// Expected: Pro post 403 for free members, draft 404, listing filtered by kind
#[tokio::test]
async fn posts_are_gated_and_filtered() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let story = factory::post::PostFactory::new(db)
        .kind(PostKind::Story)
        .build()
        .await?;
    let gated = factory::post::PostFactory::new(db)
        .min_tier(TierLevel::Pro)
        .build()
        .await?;
    let draft = factory::post::PostFactory::new(db)
        .status(PublishStatus::Draft)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let free = viewer(&user, TierLevel::Free);
    let service = PostService::new(db);

    assert!(matches!(
        service.get_by_slug(&gated.slug, &free).await,
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(
        service
            .get_by_slug(&gated.slug, &viewer(&user, TierLevel::Pro))
            .await?
            .id,
        gated.id
    );
    assert!(matches!(
        service.get_by_slug(&draft.slug, &free).await,
        Err(AppError::NotFound(_))
    ));

    let stories = service
        .get_published(
            PageParams {
                page: 0,
                per_page: 10,
            },
            Some(PostKind::Story),
        )
        .await?;
    assert_eq!(stories.total, 1);
    assert_eq!(stories.posts[0].id, story.id);

    Ok(())
}
