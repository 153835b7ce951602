use super::*;

/// Tests the member view of a channel.
///
/// Expected: only published videos, and 403 below the channel's tier
#[tokio::test]
async fn channel_videos_are_gated() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::channel::create_channel(db, TierLevel::Pro).await?;
    let published = factory::channel::create_video(db, channel.id, PublishStatus::Published).await?;
    factory::channel::create_video(db, channel.id, PublishStatus::Draft).await?;
    let user = domain_user(factory::user::create_user(db).await?);
    let integrations = Integrations::default();
    let service = ChannelService::new(db, &integrations);

    assert!(matches!(
        service
            .get_published_videos(&channel.slug, &viewer(&user, TierLevel::Free))
            .await,
        Err(AppError::Forbidden(_))
    ));

    let (found, videos) = service
        .get_published_videos(&channel.slug, &viewer(&user, TierLevel::Pro))
        .await?;
    assert_eq!(found.id, channel.id);
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, published.id);

    assert_eq!(service.get_videos(channel.id).await?.len(), 2);

    Ok(())
}

/// Tests adding a video with a URL that is not http(s).
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_non_http_video_url() -> Result<(), AppError> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::channel::create_channel(db, TierLevel::Free).await?;
    let integrations = Integrations::default();

    let result = ChannelService::new(db, &integrations)
        .create_video(
            channel.id,
            VideoParams {
                title: "Drills".to_string(),
                url: "ftp://videos.example.com/drills".to_string(),
                description: None,
                status: PublishStatus::Published,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
