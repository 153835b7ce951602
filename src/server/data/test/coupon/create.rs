use super::*;

/// Tests creating a coupon and looking it up by code.
///
/// Expected: Ok with a zero redemption count and the coupon found by code
#[tokio::test]
async fn creates_coupon_and_finds_by_code() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CouponRepository::new(db);
    let coupon = repo
        .create(CouponParams {
            code: "SPRING25".to_string(),
            percent_off: Some(25),
            amount_off_cents: None,
            max_redemptions: Some(100),
            expires_at: None,
            event_id: None,
            active: true,
        })
        .await?;

    assert_eq!(coupon.redemption_count, 0);
    assert_eq!(repo.find_by_code("SPRING25").await?.map(|c| c.id), Some(coupon.id));
    assert!(repo.find_by_code("spring25").await?.is_none());
    assert!(repo.code_taken("SPRING25", None).await?);
    assert!(!repo.code_taken("SPRING25", Some(coupon.id)).await?);

    Ok(())
}
