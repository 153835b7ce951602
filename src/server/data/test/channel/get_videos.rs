use super::*;

/// Tests listing videos for public and admin views.
///
/// Expected: public view shows published videos only, admin view shows all
#[tokio::test]
async fn public_view_hides_unpublished_videos() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::channel::create_channel(db, TierLevel::Free).await?;
    let published =
        factory::channel::create_video(db, channel.id, PublishStatus::Published).await?;
    factory::channel::create_video(db, channel.id, PublishStatus::Draft).await?;

    let repo = ChannelRepository::new(db);
    let public = repo.get_videos(channel.id, true).await?;
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, published.id);

    assert_eq!(repo.get_videos(channel.id, false).await?.len(), 2);

    Ok(())
}

/// Tests that publishing a draft video stamps its publication date.
///
/// Expected: published_at set after the update
#[tokio::test]
async fn publishing_video_sets_published_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::channel::create_channel(db, TierLevel::Free).await?;
    let draft = factory::channel::create_video(db, channel.id, PublishStatus::Draft).await?;

    let repo = ChannelRepository::new(db);
    let video = repo
        .update_video(
            draft.id,
            VideoParams {
                title: draft.title,
                url: draft.url,
                description: None,
                status: PublishStatus::Published,
            },
        )
        .await?
        .unwrap();

    assert!(video.published_at.is_some());

    Ok(())
}
