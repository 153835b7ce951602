use super::*;

/// Tests previewing a percentage coupon on a ticketed event.
///
/// Expected: discounted amount, coupon not redeemed
#[tokio::test]
async fn previews_discount() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 2000).await?;
    factory::coupon::CouponFactory::new(db)
        .code("QUARTER")
        .percent_off(25)
        .build()
        .await?;
    let service = CouponService::new(db);

    let quote = service.preview(event.id, "quarter", Utc::now()).await?;

    assert_eq!(quote.original_cents, 2000);
    assert_eq!(quote.amount_cents, 1500);
    let coupons = service.get_all().await?;
    assert_eq!(coupons[0].redemption_count, 0);

    Ok(())
}

/// Tests previewing a coupon on an event that does not sell tickets.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn preview_requires_ticketed_event() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_event(db).await?;
    let coupon = factory::coupon::create_coupon(db).await?;

    let result = CouponService::new(db)
        .preview(event.id, &coupon.code, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests quoting with an unknown code and with a discount leaving less than the minimum charge.
///
/// Expected: both Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_unusable_codes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::create_ticketed_event(db, 100).await?;
    factory::coupon::CouponFactory::new(db)
        .code("SIXTY")
        .amount_off(60)
        .build()
        .await?;
    let service = CouponService::new(db);

    assert!(matches!(
        service.preview(event.id, "NOPE", Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.preview(event.id, "SIXTY", Utc::now()).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}
