use super::*;

/// Tests creating a channel and recording its Discord channel.
///
/// Expected: channel stored without a Discord id, then with the recorded id
#[tokio::test]
async fn creates_channel_and_records_discord_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ChannelRepository::new(db);
    let channel = repo
        .create(ChannelParams {
            name: "Technique".to_string(),
            slug: "technique".to_string(),
            description: None,
            min_tier: TierLevel::Pro,
        })
        .await?;
    assert!(channel.discord_channel_id.is_none());

    repo.set_discord_channel(channel.id, 998877).await?;

    let stored = repo.find_by_slug("technique").await?.unwrap();
    assert_eq!(stored.discord_channel_id.as_deref(), Some("998877"));

    Ok(())
}

/// Tests deleting a channel along with its videos.
///
/// Expected: channel and videos removed
#[tokio::test]
async fn delete_removes_videos() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let channel = factory::channel::create_channel(db, TierLevel::Free).await?;
    factory::channel::create_video(db, channel.id, PublishStatus::Published).await?;

    let repo = ChannelRepository::new(db);
    assert!(repo.delete(channel.id).await?);
    assert!(repo.find_by_id(channel.id).await?.is_none());
    assert!(repo.get_videos(channel.id, false).await?.is_empty());

    Ok(())
}
