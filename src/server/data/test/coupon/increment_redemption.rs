use super::*;

/// Tests incrementing a coupon's redemption count.
///
/// Expected: Ok(Some) with the count raised by one per call
#[tokio::test]
async fn increments_count() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = factory::coupon::CouponFactory::new(db)
        .redemption_count(2)
        .build()
        .await?;

    let repo = CouponRepository::new(db);
    repo.increment_redemption(coupon.id).await?;
    let updated = repo.increment_redemption(coupon.id).await?.unwrap();

    assert_eq!(updated.redemption_count, 4);

    Ok(())
}

/// Tests incrementing a deleted coupon.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_coupon_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CouponRepository::new(db);
    assert!(repo.increment_redemption(404).await?.is_none());

    Ok(())
}
