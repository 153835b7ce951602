use super::*;

/// Tests program access for a free member.
///
/// Expected: free program readable, Pro program 403, draft 404
#[tokio::test]
async fn program_detail_is_gated() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let open = factory::program::create_program(db).await?;
    let gated = factory::program::ProgramFactory::new(db)
        .min_tier(TierLevel::Pro)
        .build()
        .await?;
    let draft = factory::program::ProgramFactory::new(db)
        .status(PublishStatus::Draft)
        .build()
        .await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let viewer = viewer(&user, TierLevel::Free);
    let service = ProgramService::new(db);

    assert_eq!(service.get_by_slug(&open.slug, &viewer).await?.id, open.id);
    assert!(matches!(
        service.get_by_slug(&gated.slug, &viewer).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.get_by_slug(&draft.slug, &viewer).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests the public program listing.
///
/// Expected: drafts left out
#[tokio::test]
async fn lists_only_published_programs() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let open = factory::program::create_program(db).await?;
    factory::program::ProgramFactory::new(db)
        .status(PublishStatus::Draft)
        .build()
        .await?;

    let page = ProgramService::new(db)
        .get_published(PageParams {
            page: 0,
            per_page: 10,
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.programs[0].id, open.id);

    Ok(())
}
